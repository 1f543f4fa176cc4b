//! Integration tests for fileicons

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Temporary workspace with its own config and cache file
    struct Sandbox {
        dir: TempDir,
        config: PathBuf,
    }

    impl Sandbox {
        fn new() -> Self {
            Self::with_config("")
        }

        fn with_config(extra: &str) -> Self {
            let dir = TempDir::new().unwrap();
            let config = dir.path().join("config.toml");
            let cache = dir.path().join("cache").join("icons.json");
            fs::write(
                &config,
                format!("[cache]\npath = '{}'\n{}", cache.display(), extra),
            )
            .unwrap();
            Self { dir, config }
        }

        fn path(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }

        fn touch(&self, name: &str) -> PathBuf {
            let path = self.path(name);
            fs::write(&path, "").unwrap();
            path
        }

        fn mkdir(&self, name: &str) -> PathBuf {
            let path = self.path(name);
            fs::create_dir(&path).unwrap();
            path
        }

        fn cache_file(&self) -> PathBuf {
            self.path("cache").join("icons.json")
        }

        fn cmd(&self) -> Command {
            let mut cmd = fileicons();
            cmd.arg("-c").arg(&self.config).env_remove("FILEICONS_CONFIG");
            cmd
        }
    }

    fn fileicons() -> Command {
        cargo_bin_cmd!("fileicons")
    }

    fn arg(path: &Path) -> &str {
        path.to_str().unwrap()
    }

    #[test]
    fn help_displays() {
        fileicons()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Priority-ranked icon resolution"));
    }

    #[test]
    fn version_displays() {
        fileicons()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("fileicons"));
    }

    #[test]
    fn config_path_honours_flag() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains(arg(&sandbox.config)));
    }

    #[test]
    fn config_show() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[display]"))
            .stdout(predicate::str::contains("colour_mode = \"dark\""));
    }

    #[test]
    fn config_init_refuses_overwrite() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("already exists"));

        sandbox
            .cmd()
            .args(["config", "init", "--force"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration initialized"));
        let written = fs::read_to_string(&sandbox.config).unwrap();
        assert!(written.contains("[general]"));
    }

    #[test]
    fn invalid_config_reports_hint() {
        let sandbox = Sandbox::with_config("[display]\ncolour_mode = 'sepia'\n");
        sandbox
            .cmd()
            .args(["config", "show"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn icons_lists_file_table() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["icons", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("icon-rust"))
            .stdout(predicate::str::contains("icon-source-directory").not());
    }

    #[test]
    fn icons_lists_directory_table() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["icons", "--directories", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"class\": \"icon-source-directory\""));
    }

    #[test]
    fn resolve_files_and_directories() {
        let sandbox = Sandbox::new();
        let main = sandbox.touch("main.rs");
        let src = sandbox.mkdir("src");
        let other = sandbox.touch("notes.unknownext");

        sandbox
            .cmd()
            .args(["resolve", "--format", "plain", arg(&main), arg(&src), arg(&other)])
            .assert()
            .success()
            .stdout(predicate::str::contains(format!("{}\ticon-rust\n", arg(&main))))
            .stdout(predicate::str::contains(format!(
                "{}\ticon-source-directory\n",
                arg(&src)
            )))
            .stdout(predicate::str::contains(format!("{}\tdefault-icon\n", arg(&other))));
    }

    #[test]
    fn resolve_changed_adds_colour() {
        let sandbox = Sandbox::new();
        let main = sandbox.touch("main.rs");

        sandbox
            .cmd()
            .args(["resolve", "--changed", "--format", "json", arg(&main)])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"icon\": \"icon-rust\""))
            .stdout(predicate::str::contains("\"medium-maroon\""));
    }

    #[test]
    fn resolve_missing_path_fails() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["resolve", arg(&sandbox.path("missing.rs"))])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Path not found"));
    }

    #[test]
    fn resolve_populates_cache() {
        let sandbox = Sandbox::new();
        let readme = sandbox.touch("README.md");

        sandbox.cmd().args(["resolve", arg(&readme)]).assert().success();
        assert!(sandbox.cache_file().exists());

        sandbox
            .cmd()
            .args(["cache", "show", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains(format!("{}\ticon-readme", arg(&readme))));

        // A second run starts from the cached entry and agrees with it
        sandbox
            .cmd()
            .args(["resolve", "--format", "plain", arg(&readme)])
            .assert()
            .success()
            .stdout(predicate::str::contains("icon-readme"));
    }

    #[test]
    fn cache_clear_empties_cache() {
        let sandbox = Sandbox::new();
        let main = sandbox.touch("main.rs");
        sandbox.cmd().args(["resolve", arg(&main)]).assert().success();

        sandbox
            .cmd()
            .args(["cache", "clear"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Removed 1 cached icon(s)"));

        sandbox
            .cmd()
            .args(["cache", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Icon cache is empty"));
    }

    #[test]
    fn frozen_cache_is_left_alone() {
        let sandbox = Sandbox::with_config("frozen = true\n");
        let main = sandbox.touch("main.rs");

        sandbox
            .cmd()
            .args(["resolve", "--format", "plain", arg(&main)])
            .assert()
            .success()
            .stdout(predicate::str::contains("icon-rust"));
        assert!(!sandbox.cache_file().exists());

        sandbox
            .cmd()
            .args(["cache", "clear"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("frozen"));
    }

    #[test]
    fn cache_path_honours_config() {
        let sandbox = Sandbox::new();
        sandbox
            .cmd()
            .args(["cache", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains(arg(&sandbox.cache_file())));
    }

    #[test]
    fn custom_icon_table() {
        let sandbox = Sandbox::new();
        let table = sandbox.path("table.toml");
        fs::write(
            &table,
            "[[files]]\nclass = 'icon-custom'\nmatch = ['\\.rs$']\n\n\
             [[directories]]\nclass = 'icon-folder'\nmatch = ['.']\n",
        )
        .unwrap();
        let config = format!(
            "{}\n[icons]\ntable = '{}'\n",
            fs::read_to_string(&sandbox.config).unwrap(),
            table.display()
        );
        fs::write(&sandbox.config, config).unwrap();
        let main = sandbox.touch("main.rs");

        sandbox
            .cmd()
            .args(["resolve", "--format", "plain", arg(&main)])
            .assert()
            .success()
            .stdout(predicate::str::contains("icon-custom"));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directory_follows_target() {
        let sandbox = Sandbox::new();
        let src = sandbox.mkdir("src");
        let link = sandbox.path("lib");
        std::os::unix::fs::symlink(&src, &link).unwrap();

        sandbox
            .cmd()
            .args(["resolve", "--format", "json", arg(&link)])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"icon\": \"icon-source-directory\""))
            .stdout(predicate::str::contains("icon-file-symlink-directory"))
            .stdout(predicate::str::contains("\"target\""));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_entries_survive_teardown() {
        let sandbox = Sandbox::new();
        let target = sandbox.touch("a.rs");
        let link = sandbox.path("b_link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        sandbox
            .cmd()
            .args(["resolve", arg(&target), arg(&link)])
            .assert()
            .success();

        // The target sorts first and is destroyed first on exit
        sandbox
            .cmd()
            .args(["cache", "show", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains(format!("{}\ticon-rust", arg(&target))))
            .stdout(predicate::str::contains(format!("{}\ticon-rust", arg(&link))));
    }
}
