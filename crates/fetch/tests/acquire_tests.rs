//! End-to-end tests for the acquisition pipeline against a local HTTP server.

use std::time::Duration;

use flate2::Compression;
use flate2::write::GzEncoder;
use tempfile::TempDir;
use toolup_assets::{AssetDescriptor, DistHosts};
use toolup_core::{Arch, Error, Os, Platform, RetryPolicy};
use toolup_fetch::{Acquirer, Downloader, ToolCache};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn linux() -> Platform {
    Platform::new(Os::Linux, Arch::X64)
}

fn tarball(files: &[(&str, &[u8])]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);

    for (entry_path, content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_path(entry_path).unwrap();
        header.set_size(content.len() as u64);
        header.set_mode(0o755);
        header.set_cksum();
        builder.append(&header, &content[..]).unwrap();
    }

    builder.into_inner().unwrap().finish().unwrap()
}

fn test_hosts(server: &MockServer) -> DistHosts {
    DistHosts {
        release: server.uri(),
        nightly: format!("{}/builds", server.uri()),
    }
}

fn fast_downloader(max_attempts: u32) -> Downloader {
    let policy = RetryPolicy::new(
        max_attempts,
        Duration::from_millis(10),
        Duration::from_millis(20),
    );
    Downloader::new(policy, Duration::from_secs(5))
}

#[tokio::test]
async fn acquire_downloads_extracts_and_caches() {
    let server = MockServer::start().await;
    let body = tarball(&[("compiler_20240115_abcdef0/bin/run", b"#!/bin/sh\n".as_slice())]);

    Mock::given(method("GET"))
        .and(path(
            "/compiler/releases/download/4.0.5/compiler-4.0.5-linux64.tar.gz",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let cache = ToolCache::new(tmp.path().join("cache"));
    let acquirer = Acquirer::new(tmp.path().join("work"))
        .with_cache(cache.clone())
        .with_downloader(fast_downloader(3))
        .with_hosts(test_hosts(&server));

    let asset = AssetDescriptor::compiler("4.0.5", false, linux());
    let root = acquirer.acquire(&asset).await.unwrap();

    assert_eq!(root, cache.entry_path("compiler", "4.0.5"));
    assert!(root.join("bin/run").is_file());
}

#[tokio::test]
async fn acquire_is_idempotent() {
    let server = MockServer::start().await;
    let body = tarball(&[("runtime_20240115_abcdef0/runtime.so", b"\x7fELF".as_slice())]);

    // A second acquire must not hit the network at all.
    Mock::given(method("GET"))
        .and(path(
            "/runtime/releases/download/v2-4-0/runtime-2.4.0-linux64.tar.gz",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let acquirer = Acquirer::new(tmp.path().join("work"))
        .with_cache(ToolCache::new(tmp.path().join("cache")))
        .with_downloader(fast_downloader(3))
        .with_hosts(test_hosts(&server));

    let asset = AssetDescriptor::runtime("2.4.0", linux());
    let first = acquirer.acquire(&asset).await.unwrap();
    let second = acquirer.acquire(&asset).await.unwrap();

    assert_eq!(first, second);
    server.verify().await;
}

#[tokio::test]
async fn download_exhausts_after_max_attempts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/compiler/releases/download/4.0.5/compiler-4.0.5-linux64.tar.gz",
        ))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let cache = ToolCache::new(tmp.path().join("cache"));
    let acquirer = Acquirer::new(tmp.path().join("work"))
        .with_cache(cache.clone())
        .with_downloader(fast_downloader(3))
        .with_hosts(test_hosts(&server));

    let asset = AssetDescriptor::compiler("4.0.5", false, linux());
    let result = acquirer.acquire(&asset).await;

    match result {
        Err(Error::DownloadExhausted {
            attempts,
            last_error,
            ..
        }) => {
            assert_eq!(attempts, 3);
            assert!(last_error.contains("500"));
        }
        other => panic!("expected DownloadExhausted, got {other:?}"),
    }

    // A failed acquisition must not register a cache entry.
    assert!(cache.find("compiler", "4.0.5").is_none());
    server.verify().await;
}

#[tokio::test]
async fn malformed_archive_leaves_no_cache_entry() {
    let server = MockServer::start().await;
    // An archive with no entries at all; extraction succeeds but the
    // expected wrapper directory is missing.
    let body = tarball(&[]);

    Mock::given(method("GET"))
        .and(path(
            "/compiler/releases/download/4.1.0/compiler-4.1.0-linux64.tar.gz",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let cache = ToolCache::new(tmp.path().join("cache"));
    let acquirer = Acquirer::new(tmp.path().join("work"))
        .with_cache(cache.clone())
        .with_downloader(fast_downloader(3))
        .with_hosts(test_hosts(&server));

    let asset = AssetDescriptor::compiler("4.1.0", false, linux());
    let result = acquirer.acquire(&asset).await;

    assert!(matches!(result, Err(Error::ToolRootNotFound(_))));
    assert!(cache.find("compiler", "4.1.0").is_none());
}

#[tokio::test]
async fn download_recovers_after_transient_failures() {
    let server = MockServer::start().await;
    let body = tarball(&[("compiler_20240115_abcdef0/bin/run", b"ok".as_slice())]);

    // Two failures, then success; three requests total.
    Mock::given(method("GET"))
        .and(path(
            "/compiler/releases/download/4.0.5/compiler-4.0.5-linux64.tar.gz",
        ))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(
            "/compiler/releases/download/4.0.5/compiler-4.0.5-linux64.tar.gz",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let acquirer = Acquirer::new(tmp.path().join("work"))
        .with_cache(ToolCache::new(tmp.path().join("cache")))
        .with_downloader(fast_downloader(5))
        .with_hosts(test_hosts(&server));

    let asset = AssetDescriptor::compiler("4.0.5", false, linux());
    let root = acquirer.acquire(&asset).await.unwrap();
    assert!(root.join("bin/run").is_file());
    server.verify().await;
}

#[tokio::test]
async fn install_toolchain_acquires_runtime_then_compiler() {
    let server = MockServer::start().await;

    let runtime_body = tarball(&[("runtime_20240115_abcdef0/runtime.so", b"\x7fELF".as_slice())]);
    Mock::given(method("GET"))
        .and(path(
            "/runtime/releases/download/v2-4-0/runtime-2.4.0-linux64.tar.gz",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(runtime_body))
        .expect(1)
        .mount(&server)
        .await;

    let compiler_body = tarball(&[("compiler_20240115_abcdef0/bin/run", b"ok".as_slice())]);
    Mock::given(method("GET"))
        .and(path(
            "/compiler/releases/download/4.0.5/compiler-4.0.5-linux64.tar.gz",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(compiler_body))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let cache = ToolCache::new(tmp.path().join("cache"));
    let acquirer = Acquirer::new(tmp.path().join("work"))
        .with_cache(cache.clone())
        .with_downloader(fast_downloader(3))
        .with_hosts(test_hosts(&server));

    let toolchain = toolup_fetch::install_toolchain(&acquirer, "4.0.5", false, linux())
        .await
        .unwrap();

    assert_eq!(
        toolchain.runtime_root,
        cache.entry_path("runtime", "2.4.0")
    );
    assert_eq!(
        toolchain.compiler_root,
        cache.entry_path("compiler", "4.0.5")
    );
    server.verify().await;
}
