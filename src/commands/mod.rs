//! Command implementations for stack-exports.
//!
//! Each command loads the service description, builds the export plugin and
//! fires the lifecycle events it stands in for. Flow failures have already
//! been logged by the plugin; the dispatcher only turns them into an exit code.

use crate::cli::{Cli, Command, StackArgs};
use crate::error::Result;
use crate::exit_codes;
use crate::host::{JsonFileProvider, ServiceDescription};
use crate::plugin::{ExportPlugin, FlowOutcome, LifecycleEvent};

/// Dispatch a command and return the process exit code.
///
/// The exit code is that of the first failed flow, or success when every
/// flow was written or skipped.
pub async fn dispatch(cli: Cli) -> Result<i32> {
    let plugin = build_plugin(&cli)?;

    let outcomes = match cli.command {
        Command::Package => vec![plugin.handle(LifecycleEvent::AfterPackage).await],
        Command::Deploy(args) => {
            let plugin = attach_provider(plugin, &args);
            vec![plugin.handle(LifecycleEvent::AfterDeploy).await]
        }
        Command::Run(args) => {
            let plugin = attach_provider(plugin, &args);
            plugin
                .run_all()
                .await
                .into_iter()
                .map(|(_, outcome)| outcome)
                .collect()
        }
    };

    Ok(exit_code(&outcomes))
}

/// Plugin for the service named by `cli`, with stage, region and stack overrides applied.
fn build_plugin(cli: &Cli) -> Result<ExportPlugin> {
    let service = load_service(cli)?;
    let mut plugin = ExportPlugin::new(service);
    if let Some(stack_name) = &cli.stack_name {
        plugin = plugin.with_stack_name(stack_name);
    }
    Ok(plugin)
}

fn load_service(cli: &Cli) -> Result<ServiceDescription> {
    let mut service = ServiceDescription::load(&cli.config)?;
    if let Some(stage) = &cli.stage {
        service.set_stage(stage);
    }
    if let Some(region) = &cli.region {
        service.set_region(region);
    }
    Ok(service)
}

fn attach_provider(plugin: ExportPlugin, args: &StackArgs) -> ExportPlugin {
    plugin.with_provider(JsonFileProvider::new(&args.stack_response))
}

fn exit_code(outcomes: &[FlowOutcome]) -> i32 {
    outcomes
        .iter()
        .find(|outcome| outcome.is_failure())
        .map_or(exit_codes::SUCCESS, FlowOutcome::exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExportError;
    use clap::Parser;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const STACK_JSON: &str = r#"{
  "Stacks": [
    {
      "StackName": "acme-service-dev",
      "Outputs": [
        { "OutputKey": "Foo", "OutputValue": "bar" },
        { "OutputKey": "BucketName", "OutputValue": "acme-service-dev-bucket" }
      ]
    }
  ]
}"#;

    fn write_service(dir: &TempDir, exports: &str) -> PathBuf {
        let path = dir.path().join("serverless.yml");
        let yaml = format!(
            "service: acme-service\nprovider:\n  name: aws\n  stage: ${{opt:stage, 'dev'}}\n  environment:\n    FOO: bar\n    STAGE: dev\ncustom:\n  exports:\n{}",
            exports
        );
        fs::write(&path, yaml).unwrap();
        path
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("stack-exports").chain(args.iter().copied())).unwrap()
    }

    #[tokio::test]
    async fn test_run_exports_both_flows() {
        let dir = TempDir::new().unwrap();
        let env_file = dir.path().join("env-variables.env");
        let stack_file = dir.path().join("stack-outputs.toml");
        let stack_json = dir.path().join("stack.json");
        fs::write(&stack_json, STACK_JSON).unwrap();

        let config = write_service(
            &dir,
            &format!(
                "    environment:\n      file: {}\n    stack:\n      file: {}\n      format: TOML\n",
                env_file.display(),
                stack_file.display()
            ),
        );

        let code = dispatch(cli(&[
            "run",
            "-c",
            config.to_str().unwrap(),
            "--stack-response",
            stack_json.to_str().unwrap(),
        ]))
        .await
        .unwrap();

        assert_eq!(code, exit_codes::SUCCESS);
        assert_eq!(fs::read_to_string(&env_file).unwrap(), "FOO=bar\nSTAGE=dev");
        let toml_text = fs::read_to_string(&stack_file).unwrap();
        assert!(toml_text.contains("Foo = \"bar\""));
        assert!(toml_text.contains("BucketName = \"acme-service-dev-bucket\""));
    }

    #[tokio::test]
    async fn test_deploy_with_wrong_stage_reports_provider_failure() {
        let dir = TempDir::new().unwrap();
        let stack_file = dir.path().join("stack.env");
        let stack_json = dir.path().join("stack.json");
        fs::write(&stack_json, STACK_JSON).unwrap();

        let config = write_service(
            &dir,
            &format!("    stack:\n      file: {}\n", stack_file.display()),
        );

        let code = dispatch(cli(&[
            "deploy",
            "-c",
            config.to_str().unwrap(),
            "--stage",
            "prod",
            "--stack-response",
            stack_json.to_str().unwrap(),
        ]))
        .await
        .unwrap();

        assert_eq!(code, exit_codes::PROVIDER_FAILURE);
        assert!(!stack_file.exists());
    }

    #[test]
    fn test_region_override_reaches_plugin() {
        let dir = TempDir::new().unwrap();
        let config = write_service(&dir, "    {}\n");

        let plugin = build_plugin(&cli(&[
            "package",
            "-c",
            config.to_str().unwrap(),
            "--region",
            "eu-central-1",
        ]))
        .unwrap();
        assert_eq!(plugin.region(), "eu-central-1");

        let plugin = build_plugin(&cli(&["package", "-c", config.to_str().unwrap()])).unwrap();
        assert_eq!(plugin.region(), crate::host::service::DEFAULT_REGION);
    }

    #[tokio::test]
    async fn test_package_without_exports_is_skipped() {
        let dir = TempDir::new().unwrap();
        let config = write_service(&dir, "    {}\n");

        let code = dispatch(cli(&["package", "-c", config.to_str().unwrap()]))
            .await
            .unwrap();

        assert_eq!(code, exit_codes::SUCCESS);
    }

    #[tokio::test]
    async fn test_missing_service_file_is_config_error() {
        let err = dispatch(cli(&["package", "-c", "/nonexistent/serverless.yml"]))
            .await
            .unwrap_err();

        assert!(matches!(err, ExportError::Config(_)));
    }
}
