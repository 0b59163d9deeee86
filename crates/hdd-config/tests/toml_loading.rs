//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var and file manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use hdd_config::HddConfig;

#[test]
fn loads_mds_and_publish_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[mds]
base_url = "http://localhost:8080/mds"
timeout_secs = 5

[publish]
repository_url = "https://github.com/example/dictionaries/tree/dev"
"#,
        )?;

        let config: HddConfig = Figment::from(Serialized::defaults(HddConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.mds.base_url, "http://localhost:8080/mds");
        assert_eq!(config.mds.timeout_secs, 5);
        assert_eq!(
            config.publish.repository_url,
            "https://github.com/example/dictionaries/tree/dev"
        );
        Ok(())
    });
}

#[test]
fn loads_converter_template_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[converter]
program = "/opt/heal/bin/vlmd"
args = ["extract", "--inputtype", "{inputtype}", "--title", "{title}", "--outputfile", "{output}", "{input}"]
"#,
        )?;

        let config: HddConfig = Figment::from(Serialized::defaults(HddConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.converter.program, "/opt/heal/bin/vlmd");
        assert_eq!(config.converter.args.len(), 8);
        assert!(config.converter.validate().is_ok());
        Ok(())
    });
}

#[test]
fn partial_section_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[mds]
timeout_secs = 90
"#,
        )?;

        let config: HddConfig = Figment::from(Serialized::defaults(HddConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.mds.timeout_secs, 90);
        assert_eq!(config.mds.base_url, "https://healdata.org/mds");
        assert_eq!(config.converter.program, "vlmd");
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[redcap]
api_url = "https://redcap.toml.example/api/"
api_token = "toml-token"
"#,
        )?;
        jail.set_env("HDD_REDCAP__API_TOKEN", "env-token");

        let config: HddConfig = Figment::from(Serialized::defaults(HddConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("HDD_").split("__"))
            .extract()?;

        assert_eq!(config.redcap.api_url, "https://redcap.toml.example/api/");
        assert_eq!(config.redcap.api_token, "env-token");
        assert!(config.redcap.is_configured());
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up_by_figment() {
    Jail::expect_with(|jail| {
        jail.create_dir(".hdd")?;
        jail.create_file(
            ".hdd/config.toml",
            r#"
[converter]
program = "project-vlmd"
"#,
        )?;

        let config: HddConfig = HddConfig::figment().extract()?;
        assert_eq!(config.converter.program, "project-vlmd");
        Ok(())
    });
}

#[cfg(target_os = "linux")]
#[test]
fn project_file_beats_user_file() {
    Jail::expect_with(|jail| {
        jail.create_dir("xdg/heal-dd")?;
        jail.create_file(
            "xdg/heal-dd/config.toml",
            r#"
[converter]
program = "user-vlmd"

[mds]
timeout_secs = 12
"#,
        )?;
        jail.create_dir(".hdd")?;
        jail.create_file(
            ".hdd/config.toml",
            r#"
[converter]
program = "project-vlmd"
"#,
        )?;
        jail.set_env("XDG_CONFIG_HOME", jail.directory().join("xdg").display());

        let config: HddConfig = HddConfig::figment().extract()?;
        assert_eq!(config.converter.program, "project-vlmd");
        // untouched by the project file, so the user value survives
        assert_eq!(config.mds.timeout_secs, 12);
        assert_eq!(config.mds.base_url, "https://healdata.org/mds");
        Ok(())
    });
}
