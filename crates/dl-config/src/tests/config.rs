use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, eq, ok};
use serial_test::serial;

// =========================================================================
// Load Tests
// =========================================================================

#[test]
#[serial]
fn given_no_config_file_when_load_then_defaults() {
    // Given
    let _temp = setup_config_dir();

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.hdfs.name_node_url.as_str(), eq("http://127.0.0.1:9870"));
    assert_that!(config.hbase.port, eq(9090));
    assert_that!(config.hbase.default_table.as_str(), eq("t_target"));
    assert_that!(config.hbase.column_family.as_str(), eq("t"));
    assert_that!(config.hbase.ttl_secs, eq(172_800));
    assert_that!(config.cache.url.as_str(), eq("redis://127.0.0.1:6379"));
    assert_that!(config.cache.namespace.as_str(), eq("user"));
    assert_that!(config.validate(), ok(anything()));
}

#[test]
#[serial]
fn given_config_toml_when_load_then_file_values_used() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        r#"
            [hdfs]
            name_node_url = "http://namenode.internal:9870"
            user = "hadoop"

            [hbase]
            host = "hbase.internal"
            port = 9091

            [cache]
            namespace = "acct"
            ttl_secs = 120
        "#,
    )
    .unwrap();

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(
        config.hdfs.name_node_url.as_str(),
        eq("http://namenode.internal:9870")
    );
    assert_that!(config.hdfs.user.as_deref(), eq(Some("hadoop")));
    assert_that!(config.hbase.addr().as_str(), eq("hbase.internal:9091"));
    assert_that!(config.cache.namespace.as_str(), eq("acct"));
    assert_that!(config.cache.ttl_secs, eq(120));
}

#[test]
#[serial]
fn given_env_overrides_when_load_then_env_wins_over_file() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        r#"
            [hbase]
            host = "from-file"
        "#,
    )
    .unwrap();
    let _host = EnvGuard::set("DL_HBASE_HOST", "from-env");
    let _port = EnvGuard::set("DL_HBASE_PORT", "19090");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.hbase.host.as_str(), eq("from-env"));
    assert_that!(config.hbase.port, eq(19090));
}

#[test]
#[serial]
fn given_unparseable_env_override_when_load_then_ignored() {
    // Given
    let _temp = setup_config_dir();
    let _port = EnvGuard::set("DL_HBASE_PORT", "not-a-port");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.hbase.port, eq(9090));
}

#[test]
#[serial]
fn given_missing_config_dir_when_load_then_created() {
    // Given
    let temp = tempfile::TempDir::new().unwrap();
    let nested = temp.path().join("nested").join("conf");
    let _guard = EnvGuard::set("DL_CONFIG_DIR", nested.to_str().unwrap());

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    assert!(nested.exists());
}
