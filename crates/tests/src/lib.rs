//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 配置 -> Dispatcher -> 文件 的完整链路
//! - 并发注册与并发写入
//! - 目标分发与失败隔离

#[cfg(test)]
mod e2e_tests {
    use std::fs;
    use std::path::Path;
    use std::sync::Arc;

    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{DeviceInfo, SinkIdentity, SinkKind};
    use dispatcher::{create_dispatcher, Dispatcher, Sink};
    use tempfile::tempdir;

    fn path_str(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }

    /// End-to-end test: TOML config -> Dispatcher -> files
    ///
    /// 验证完整的数据流：
    /// 1. ConfigLoader 解析并校验配置
    /// 2. DispatcherBuilder 按顺序注册 sinks (去重)
    /// 3. log 写入所有 sink，新建文件带设备信息头
    #[tokio::test]
    async fn test_e2e_config_pipeline() {
        let dir = tempdir().unwrap();
        let app = dir.path().join("app.log");
        let raw = dir.path().join("raw.log");
        let remote = dir.path().join("remote.log");

        let content = format!(
            r#"
[device]
os_version = "1.0"
app_version = "2.0"
device_model = "Pixel"

[[sinks]]
kind = "file"
path = "{app}"

[[sinks]]
kind = "file"
path = "{raw}"
with_header = false

[[sinks]]
kind = "file"
path = "{app}"

[[sinks]]
kind = "remote"
destination = "file://{remote}"
"#,
            app = app.display(),
            raw = raw.display(),
            remote = remote.display(),
        );

        let blueprint = ConfigLoader::load_from_str(&content, ConfigFormat::Toml).unwrap();
        let dispatcher = create_dispatcher(blueprint);

        assert_eq!(
            dispatcher.identities(),
            vec![
                SinkIdentity::Console,
                SinkIdentity::File(path_str(&app)),
                SinkIdentity::File(path_str(&raw)),
                SinkIdentity::Remote(format!("file://{}", remote.display())),
            ]
        );

        dispatcher.log("first").await;
        dispatcher.log("second").await;
        dispatcher.flush().await;

        let app_content = fs::read_to_string(&app).unwrap();
        assert!(app_content.starts_with("**************\n \nDevice Model: Pixel\nOS Version: 1.0\nApp Version: 2.0\n \n**************\n"));
        assert!(app_content.ends_with("**************\nfirst\nsecond\n"));
        assert_eq!(app_content.matches("Device Model").count(), 1);

        assert_eq!(fs::read_to_string(&raw).unwrap(), "first\nsecond\n");
        assert_eq!(fs::read_to_string(&remote).unwrap(), "first\nsecond\n");
    }

    /// `logToFileAndConsoleOnly("/x", "hello")` with [Console, File(x), File(y)]
    #[tokio::test]
    async fn test_e2e_targeted_dispatch() {
        let dir = tempdir().unwrap();
        let x = dir.path().join("x.log");
        let y = dir.path().join("y.log");

        let dispatcher = Dispatcher::new();
        dispatcher.add_output(Sink::file(path_str(&x), None));
        dispatcher.add_output(Sink::file(path_str(&y), None));

        dispatcher.log_to_file_and_console_only(&path_str(&x), "hello").await;

        assert_eq!(fs::read_to_string(&x).unwrap(), "hello\n");
        assert!(!y.exists());
        let counts: Vec<u64> = dispatcher
            .metrics()
            .iter()
            .map(|(_, m)| m.write_count)
            .collect();
        assert_eq!(counts, vec![1, 1, 0]);
    }

    #[tokio::test]
    async fn test_e2e_header_once_across_writes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.log");

        let dispatcher = Dispatcher::new();
        dispatcher.add_output(Sink::file(
            path_str(&path),
            Some(DeviceInfo::new("1.0", "2.0", "Pixel")),
        ));

        dispatcher.log("line one").await;
        let after_first = fs::read_to_string(&path).unwrap();
        assert!(after_first.contains("Device Model: Pixel"));
        assert!(after_first.contains("OS Version: 1.0"));
        assert!(after_first.contains("App Version: 2.0"));
        assert!(after_first.ends_with("line one\n"));

        dispatcher.log("line two").await;
        let after_second = fs::read_to_string(&path).unwrap();
        assert_eq!(after_second, format!("{after_first}line two\n"));
    }

    #[tokio::test]
    async fn test_e2e_unwritable_destination_is_silent() {
        let dir = tempdir().unwrap();
        let broken = dir.path().join("nope").join("broken.log");
        let good = dir.path().join("good.log");

        let dispatcher = Dispatcher::new();
        dispatcher.add_output(Sink::file(
            path_str(&broken),
            Some(DeviceInfo::default()),
        ));
        dispatcher.add_output(Sink::file(path_str(&good), None));

        // Returns normally, no panic, other sinks unaffected
        dispatcher.log("survives").await;
        dispatcher.log("again").await;

        assert!(!broken.exists());
        assert_eq!(fs::read_to_string(&good).unwrap(), "survives\nagain\n");
        let metrics = dispatcher.metrics();
        assert_eq!(metrics[1].1.dropped_count, 2);
        assert_eq!(metrics[2].1.write_count, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_e2e_concurrent_registration_is_idempotent() {
        let dispatcher = Arc::new(Dispatcher::new());

        let mut tasks = Vec::new();
        for i in 0..16 {
            let dispatcher = Arc::clone(&dispatcher);
            tasks.push(tokio::spawn(async move {
                let path = if i % 2 == 0 { "/shared/a.log" } else { "/shared/b.log" };
                dispatcher.add_output(Sink::file(path, None))
            }));
        }

        let mut accepted = 0;
        for task in tasks {
            if task.await.unwrap() {
                accepted += 1;
            }
        }

        assert_eq!(accepted, 2);
        assert_eq!(dispatcher.count_of(SinkKind::File), 2);
        assert_eq!(dispatcher.count_of(SinkKind::Console), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_e2e_concurrent_log_and_register() {
        let dir = tempdir().unwrap();
        let early = dir.path().join("early.log");
        let late = dir.path().join("late.log");

        let dispatcher = Arc::new(Dispatcher::new());
        dispatcher.add_output(Sink::file(path_str(&early), None));

        let mut tasks = Vec::new();
        for writer in 0..4 {
            let dispatcher = Arc::clone(&dispatcher);
            tasks.push(tokio::spawn(async move {
                for i in 0..25 {
                    dispatcher.log(&format!("w{writer}-{i}")).await;
                }
            }));
        }

        let registrar = {
            let dispatcher = Arc::clone(&dispatcher);
            let late = path_str(&late);
            tokio::spawn(async move { dispatcher.add_output(Sink::file(late, None)) })
        };

        for task in tasks {
            task.await.unwrap();
        }
        assert!(registrar.await.unwrap());

        let early_lines = fs::read_to_string(&early).unwrap();
        assert_eq!(early_lines.lines().count(), 100);
        assert!(early_lines.lines().all(|l| l.starts_with('w')));

        // The late sink only sees lines logged after it was registered
        let late_count = fs::read_to_string(&late)
            .map(|c| c.lines().count())
            .unwrap_or(0);
        assert!(late_count <= 100);
        assert_eq!(dispatcher.sink_count(), 3);
    }

    #[tokio::test]
    async fn test_e2e_shared_dispatcher() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shared.log");

        let shared = Dispatcher::shared();
        assert!(shared.add_output(Sink::file(path_str(&path), None)));
        assert!(!Dispatcher::shared().add_output(Sink::file(path_str(&path), None)));

        Dispatcher::shared().log("via singleton").await;
        assert_eq!(fs::read_to_string(&path).unwrap(), "via singleton\n");
    }
}
