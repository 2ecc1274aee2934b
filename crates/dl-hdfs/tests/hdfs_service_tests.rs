//! Integration tests for the WebHDFS facade using a wiremock namenode

use dl_hdfs::HdfsService;

use serde_json::json;
use wiremock::matchers::{body_string, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({
        "RemoteException": {
            "exception": "FileNotFoundException",
            "javaClassName": "java.io.FileNotFoundException",
            "message": "File does not exist"
        }
    }))
}

fn dir_status() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "FileStatus": {
            "pathSuffix": "",
            "type": "DIRECTORY",
            "length": 0
        }
    }))
}

fn file_status(length: u64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "FileStatus": {
            "pathSuffix": "",
            "type": "FILE",
            "length": length
        }
    }))
}

#[tokio::test]
async fn test_mkdir_creates_missing_directory() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webhdfs/v1/input"))
        .and(query_param("op", "GETFILESTATUS"))
        .respond_with(not_found())
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/webhdfs/v1/input"))
        .and(query_param("op", "MKDIRS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"boolean": true})))
        .expect(1)
        .mount(&server)
        .await;

    let hdfs = HdfsService::new(&server.uri(), None).unwrap();
    assert!(hdfs.mkdir("/input").await);
}

#[tokio::test]
async fn test_mkdir_short_circuits_when_directory_exists() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webhdfs/v1/input"))
        .and(query_param("op", "GETFILESTATUS"))
        .respond_with(dir_status())
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(query_param("op", "MKDIRS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"boolean": true})))
        .expect(0)
        .mount(&server)
        .await;

    let hdfs = HdfsService::new(&server.uri(), None).unwrap();
    assert!(hdfs.mkdir("/input").await);
}

#[tokio::test]
async fn test_exists_false_on_missing_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webhdfs/v1/nope"))
        .and(query_param("op", "GETFILESTATUS"))
        .respond_with(not_found())
        .mount(&server)
        .await;

    let hdfs = HdfsService::new(&server.uri(), None).unwrap();
    assert!(!hdfs.exists("/nope").await);
}

#[tokio::test]
async fn test_user_name_is_forwarded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webhdfs/v1/data"))
        .and(query_param("op", "GETFILESTATUS"))
        .and(query_param("user.name", "hadoop"))
        .respond_with(file_status(1))
        .expect(1)
        .mount(&server)
        .await;

    let hdfs = HdfsService::new(&server.uri(), Some("hadoop")).unwrap();
    assert!(hdfs.exists("/data").await);
}

#[tokio::test]
async fn test_list_files_builds_full_paths() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webhdfs/v1/testDir"))
        .and(query_param("op", "GETFILESTATUS"))
        .respond_with(dir_status())
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/webhdfs/v1/testDir"))
        .and(query_param("op", "LISTSTATUS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "FileStatuses": {
                "FileStatus": [
                    {"pathSuffix": "a.txt", "type": "FILE", "length": 10},
                    {"pathSuffix": "sub", "type": "DIRECTORY", "length": 0}
                ]
            }
        })))
        .mount(&server)
        .await;

    let hdfs = HdfsService::new(&server.uri(), None).unwrap();
    let entries = hdfs.list_files("/testDir").await;

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].path, "/testDir/a.txt");
    assert!(!entries[0].is_dir);
    assert_eq!(entries[1].path, "/testDir/sub");
    assert!(entries[1].is_dir);
}

#[tokio::test]
async fn test_list_files_matching_applies_predicate() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webhdfs/v1/testDir"))
        .and(query_param("op", "GETFILESTATUS"))
        .respond_with(dir_status())
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/webhdfs/v1/testDir"))
        .and(query_param("op", "LISTSTATUS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "FileStatuses": {
                "FileStatus": [
                    {"pathSuffix": "a.txt", "type": "FILE", "length": 10},
                    {"pathSuffix": "b.log", "type": "FILE", "length": 20}
                ]
            }
        })))
        .mount(&server)
        .await;

    let hdfs = HdfsService::new(&server.uri(), None).unwrap();
    let entries = hdfs
        .list_files_matching("/testDir", |p| p.ends_with(".txt"))
        .await;

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].path, "/testDir/a.txt");
}

#[tokio::test]
async fn test_list_files_empty_when_path_missing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webhdfs/v1/missing"))
        .and(query_param("op", "GETFILESTATUS"))
        .respond_with(not_found())
        .mount(&server)
        .await;

    let hdfs = HdfsService::new(&server.uri(), None).unwrap();
    assert!(hdfs.list_files("/missing").await.is_empty());
}

#[tokio::test]
async fn test_read_string_follows_transfer_location() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webhdfs/v1/output/part-r-00000"))
        .and(query_param("op", "OPEN"))
        .and(query_param("noredirect", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Location": format!("{}/dn/output/part-r-00000", server.uri())
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dn/output/part-r-00000"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello\t2\nworld\t1\n"))
        .mount(&server)
        .await;

    let hdfs = HdfsService::new(&server.uri(), None).unwrap();
    let text = hdfs.read_string("/output/part-r-00000").await;

    assert_eq!(text.as_deref(), Some("hello\t2\nworld\t1\n"));
}

#[tokio::test]
async fn test_read_string_follows_legacy_redirect() {
    let server = MockServer::start().await;

    // Old namenodes ignore noredirect and answer 307 + Location header
    Mock::given(method("GET"))
        .and(path("/webhdfs/v1/legacy.txt"))
        .and(query_param("op", "OPEN"))
        .respond_with(
            ResponseTemplate::new(307)
                .insert_header("Location", format!("{}/dn/legacy.txt", server.uri()).as_str()),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dn/legacy.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("legacy"))
        .mount(&server)
        .await;

    let hdfs = HdfsService::new(&server.uri(), None).unwrap();
    assert_eq!(hdfs.read_string("/legacy.txt").await.as_deref(), Some("legacy"));
}

#[tokio::test]
async fn test_read_json_decodes_object() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webhdfs/v1/testDir/user.json"))
        .and(query_param("op", "OPEN"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Location": format!("{}/dn/user.json", server.uri())
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dn/user.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"name":"u1","logins":3}"#),
        )
        .mount(&server)
        .await;

    #[derive(serde::Deserialize)]
    struct Probe {
        name: String,
        logins: u32,
    }

    let hdfs = HdfsService::new(&server.uri(), None).unwrap();
    let probe: Probe = hdfs.read_json("/testDir/user.json").await.unwrap();

    assert_eq!(probe.name, "u1");
    assert_eq!(probe.logins, 3);
}

#[tokio::test]
async fn test_read_bytes_none_when_missing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webhdfs/v1/absent.bin"))
        .and(query_param("op", "OPEN"))
        .respond_with(not_found())
        .mount(&server)
        .await;

    let hdfs = HdfsService::new(&server.uri(), None).unwrap();
    assert!(hdfs.read_bytes("/absent.bin").await.is_none());
}

#[tokio::test]
async fn test_upload_file_into_directory() {
    let server = MockServer::start().await;
    let local = tempfile::TempDir::new().unwrap();
    let src = local.path().join("hadoop1.txt");
    std::fs::write(&src, "alpha beta").unwrap();

    Mock::given(method("GET"))
        .and(path("/webhdfs/v1/input"))
        .and(query_param("op", "GETFILESTATUS"))
        .respond_with(dir_status())
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/webhdfs/v1/input/hadoop1.txt"))
        .and(query_param("op", "CREATE"))
        .and(query_param("overwrite", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Location": format!("{}/dn/input/hadoop1.txt", server.uri())
        })))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/dn/input/hadoop1.txt"))
        .and(body_string("alpha beta"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let hdfs = HdfsService::new(&server.uri(), None).unwrap();
    assert!(hdfs.upload_file(&src, "/input").await);
    assert!(src.exists());
}

#[tokio::test]
async fn test_upload_file_with_del_src_removes_local_file() {
    let server = MockServer::start().await;
    let local = tempfile::TempDir::new().unwrap();
    let src = local.path().join("drop-me.txt");
    std::fs::write(&src, "payload").unwrap();

    Mock::given(method("GET"))
        .and(path("/webhdfs/v1/target.txt"))
        .and(query_param("op", "GETFILESTATUS"))
        .respond_with(not_found())
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/webhdfs/v1/target.txt"))
        .and(query_param("op", "CREATE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Location": format!("{}/dn/target.txt", server.uri())
        })))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/dn/target.txt"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let hdfs = HdfsService::new(&server.uri(), None).unwrap();
    assert!(hdfs.upload_file_with(true, true, &src, "/target.txt").await);
    assert!(!src.exists());
}

#[tokio::test]
async fn test_download_file_creates_parent_directories() {
    let server = MockServer::start().await;
    let local = tempfile::TempDir::new().unwrap();
    let dst = local.path().join("nested").join("wordcount1");

    Mock::given(method("GET"))
        .and(path("/webhdfs/v1/output/part-r-00000"))
        .and(query_param("op", "OPEN"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Location": format!("{}/dn/output/part-r-00000", server.uri())
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dn/output/part-r-00000"))
        .respond_with(ResponseTemplate::new(200).set_body_string("counts"))
        .mount(&server)
        .await;

    let hdfs = HdfsService::new(&server.uri(), None).unwrap();
    assert!(hdfs.download_file("/output/part-r-00000", &dst).await);
    assert_eq!(std::fs::read_to_string(&dst).unwrap(), "counts");
}

#[tokio::test]
async fn test_rename_passes_destination() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/webhdfs/v1/testDir/b.txt"))
        .and(query_param("op", "RENAME"))
        .and(query_param("destination", "/testDir/b_new.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"boolean": true})))
        .expect(1)
        .mount(&server)
        .await;

    let hdfs = HdfsService::new(&server.uri(), None).unwrap();
    assert!(hdfs.rename("/testDir/b.txt", "/testDir/b_new.txt").await);
}

#[tokio::test]
async fn test_delete_is_recursive() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/webhdfs/v1/testDir"))
        .and(query_param("op", "DELETE"))
        .and(query_param("recursive", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"boolean": true})))
        .expect(1)
        .mount(&server)
        .await;

    let hdfs = HdfsService::new(&server.uri(), None).unwrap();
    assert!(hdfs.delete("/testDir").await);
}

#[tokio::test]
async fn test_delete_sentinel_on_remote_error() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/webhdfs/v1/protected"))
        .and(query_param("op", "DELETE"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "RemoteException": {
                "exception": "AccessControlException",
                "message": "Permission denied"
            }
        })))
        .mount(&server)
        .await;

    let hdfs = HdfsService::new(&server.uri(), None).unwrap();
    assert!(!hdfs.delete("/protected").await);
}

#[tokio::test]
async fn test_file_block_locations() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webhdfs/v1/testDir/a.txt"))
        .and(query_param("op", "GETFILEBLOCKLOCATIONS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "BlockLocations": {
                "BlockLocation": [
                    {
                        "hosts": ["dn1", "dn2"],
                        "names": ["dn1:9866", "dn2:9866"],
                        "offset": 0,
                        "length": 134217728,
                        "corrupt": false
                    },
                    {
                        "hosts": ["dn3"],
                        "names": ["dn3:9866"],
                        "offset": 134217728,
                        "length": 1024,
                        "corrupt": false
                    }
                ]
            }
        })))
        .mount(&server)
        .await;

    let hdfs = HdfsService::new(&server.uri(), None).unwrap();
    let locations = hdfs.file_block_locations("/testDir/a.txt").await;

    assert_eq!(locations.len(), 2);
    assert_eq!(locations[0].hosts, vec!["dn1", "dn2"]);
    assert_eq!(locations[1].offset, 134217728);
    assert!(!locations[1].corrupt);
}

#[tokio::test]
async fn test_block_locations_empty_on_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webhdfs/v1/gone"))
        .and(query_param("op", "GETFILEBLOCKLOCATIONS"))
        .respond_with(not_found())
        .mount(&server)
        .await;

    let hdfs = HdfsService::new(&server.uri(), None).unwrap();
    assert!(hdfs.file_block_locations("/gone").await.is_empty());
}
