//! End-to-end `reactrender` runs against a temporary HOME.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn reactrender(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("reactrender").expect("binary");
    cmd.env("HOME", home.path())
        .env("USERPROFILE", home.path())
        .env_remove("RUST_LOG");
    cmd
}

fn templates(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, content) in files {
        std::fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}

#[test]
fn client_side_render_prints_bootstrap_markup() {
    let home = TempDir::new().unwrap();
    let tpl = templates(&[(
        "page.html",
        r#"<body>{{ react_component(name="Greeter", props=user, buffered=true) }}{{ react_flush_buffer() }}</body>"#,
    )]);
    let data = home.path().join("data.json");
    std::fs::write(&data, r#"{"user":{"name":"Ada"}}"#).unwrap();

    reactrender(&home)
        .arg("render")
        .arg("page.html")
        .arg("--templates-dir")
        .arg(tpl.path())
        .arg("--data")
        .arg(&data)
        .arg("--rendering")
        .arg("client_side")
        .arg("--path")
        .arg("/welcome?ref=mail")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(r#"<body><div id="sfreact-"#))
        .stdout(predicate::str::contains(
            r#"class="js-react-on-rails-component" data-component-name="Greeter""#,
        ))
        .stdout(predicate::str::contains(r#">{"name":"Ada"}</script>"#))
        .stdout(predicate::str::contains(r#""location":"\/welcome?ref=mail""#));
}

#[test]
fn server_side_without_socket_fails() {
    let home = TempDir::new().unwrap();
    let tpl = templates(&[("page.html", r#"{{ react_component(name="Greeter") }}"#)]);

    reactrender(&home)
        .arg("render")
        .arg("page.html")
        .arg("--templates-dir")
        .arg(tpl.path())
        .arg("--rendering")
        .arg("server_side")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to render 'page.html'"))
        .stderr(predicate::str::contains("no renderer is configured"));
}

#[test]
fn unknown_rendering_flag_is_rejected() {
    let home = TempDir::new().unwrap();
    reactrender(&home)
        .args(["render", "page.html", "--rendering", "sideways"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown rendering mode 'sideways'"));
}

#[test]
fn missing_templates_dir_is_explained() {
    let home = TempDir::new().unwrap();
    reactrender(&home)
        .args(["render", "page.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no templates directory"));
}

#[test]
fn config_init_then_show() {
    let home = TempDir::new().unwrap();

    reactrender(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yaml"));
    assert!(home.path().join(".reactrender").join("config.yaml").exists());

    reactrender(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    reactrender(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default_rendering: both"));
}

#[test]
fn config_templates_dir_is_used() {
    let home = TempDir::new().unwrap();
    let tpl = templates(&[("page.html", r#"{{ react_component(name="Widget") }}"#)]);
    let cfg_dir = home.path().join(".reactrender");
    std::fs::create_dir_all(&cfg_dir).unwrap();
    std::fs::write(
        cfg_dir.join("config.yaml"),
        format!(
            "default_rendering: client_side\ntemplates_dir: {}\n",
            tpl.path().display()
        ),
    )
    .unwrap();

    reactrender(&home)
        .args(["render", "page.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"data-component-name="Widget""#));
}
