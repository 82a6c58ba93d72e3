//! Integration tests for nupick
//!
//! These tests verify:
//! - Parsing realistic `dotnet list package --outdated --format json` output
//! - Presentation of merged and ambiguous candidates
//! - The orchestrator driven through the public runner and selector seams

use async_trait::async_trait;
use nupick::domain::{RunOutcome, SelectionItem, ToolStatus};
use nupick::error::{AppError, SelectionError};
use nupick::inventory::{extract_payload, parse_payload, select_payload};
use nupick::log::DiagnosticLog;
use nupick::orchestrator::{Orchestrator, OrchestratorConfig};
use nupick::present::{filter_selected, to_selection_items};
use nupick::process::{CommandRunner, Echo, Invocation, ProcessOutput};
use nupick::select::Selector;
use nupick::toolchain::Toolchain;
use std::sync::Mutex;

/// Output shaped like the .NET 8 SDK's JSON listing for a two-project solution
const SOLUTION_LISTING: &str = r#"{
  "version": 1,
  "parameters": "--outdated",
  "sources": ["https://api.nuget.org/v3/index.json"],
  "projects": [
    {
      "path": "/src/Shop/Shop.Api/Shop.Api.csproj",
      "frameworks": [
        {
          "framework": "net8.0",
          "name": "net8.0",
          "topLevelPackages": [
            {"id": "Newtonsoft.Json", "requestedVersion": "13.0.1", "resolvedVersion": "13.0.1", "latestVersion": "13.0.3"},
            {"id": "Serilog", "requestedVersion": "3.0.0", "resolvedVersion": "3.0.0", "latestVersion": "3.1.1"}
          ]
        }
      ]
    },
    {
      "path": "/src/Shop/Shop.Tests/Shop.Tests.csproj",
      "frameworks": [
        {
          "name": "net6.0",
          "topLevelPackages": [
            {"id": "Newtonsoft.Json", "requestedVersion": "13.0.1", "resolvedVersion": "13.0.1", "latestVersion": "13.0.3"},
            {"id": "xunit", "requestedVersion": "2.4.2", "resolvedVersion": "2.4.2", "latestVersion": "2.6.6"}
          ]
        },
        {
          "name": "net8.0",
          "topLevelPackages": [
            {"id": "xunit", "requestedVersion": "2.5.0", "resolvedVersion": "2.5.0", "latestVersion": "2.6.6"}
          ]
        }
      ]
    }
  ]
}"#;

mod payload_parsing {
    use super::*;

    #[test]
    fn test_solution_listing_merges_by_id() {
        let candidates = parse_payload(SOLUTION_LISTING).unwrap();

        let ids: Vec<_> = candidates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["Newtonsoft.Json", "Serilog", "xunit"]);

        let json = &candidates[0];
        assert_eq!(json.contexts.len(), 2);
        assert!(json
            .contexts
            .contains("/src/Shop/Shop.Api/Shop.Api.csproj (net8.0)"));
        assert!(json
            .contexts
            .contains("/src/Shop/Shop.Tests/Shop.Tests.csproj (net6.0)"));

        let xunit = &candidates[2];
        assert_eq!(xunit.resolved_versions.len(), 2);
        assert_eq!(xunit.latest_versions.len(), 1);
    }

    #[test]
    fn test_listing_wrapped_in_restore_noise() {
        let noisy = format!(
            "  Determining projects to restore...\n  All projects are up-to-date for restore.\n{}\n",
            SOLUTION_LISTING
        );
        assert_eq!(
            parse_payload(&noisy).unwrap(),
            parse_payload(SOLUTION_LISTING).unwrap()
        );
        assert_eq!(extract_payload(&noisy), SOLUTION_LISTING);
    }

    #[test]
    fn test_listing_on_stderr() {
        let raw = select_payload("", SOLUTION_LISTING).unwrap();
        assert_eq!(parse_payload(raw).unwrap().len(), 3);
    }
}

mod presentation {
    use super::*;

    #[test]
    fn test_items_for_solution_listing() {
        let candidates = parse_payload(SOLUTION_LISTING).unwrap();
        let items = to_selection_items(&candidates);

        assert_eq!(items[0].label, "Newtonsoft.Json");
        assert_eq!(items[0].description, "13.0.1 -> 13.0.3");
        assert_eq!(
            items[0].detail,
            "/src/Shop/Shop.Api/Shop.Api.csproj (net8.0); /src/Shop/Shop.Tests/Shop.Tests.csproj (net6.0)"
        );
        assert_eq!(items[1].description, "3.0.0 -> 3.1.1");
        assert_eq!(items[2].description, "multiple versions");
    }

    #[test]
    fn test_filter_selected_against_listing() {
        let candidates = parse_payload(SOLUTION_LISTING).unwrap();
        let labels = vec!["xunit".to_string(), "Serilog".to_string()];
        assert_eq!(filter_selected(&candidates, &labels), vec!["xunit", "Serilog"]);
    }
}

mod orchestration {
    use super::*;

    /// Runner standing in for a healthy SDK with the tool already installed
    struct HealthySdk {
        calls: Mutex<Vec<Invocation>>,
    }

    impl HealthySdk {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CommandRunner for HealthySdk {
        async fn run(
            &self,
            invocation: &Invocation,
            _echo: Echo,
            _log: &DiagnosticLog,
        ) -> ProcessOutput {
            self.calls.lock().unwrap().push(invocation.clone());
            let stdout = if invocation.args.iter().any(|a| a == "--outdated") {
                SOLUTION_LISTING.to_string()
            } else {
                String::new()
            };
            ProcessOutput {
                code: 0,
                stdout,
                stderr: String::new(),
            }
        }
    }

    /// Picks every ambiguous candidate
    struct AmbiguousOnly;

    impl Selector for AmbiguousOnly {
        fn select(
            &self,
            items: &[SelectionItem],
            _log: &DiagnosticLog,
        ) -> Result<Vec<String>, SelectionError> {
            Ok(items
                .iter()
                .filter(|i| i.description == "multiple versions")
                .map(|i| i.label.clone())
                .collect())
        }
    }

    #[tokio::test]
    async fn test_run_upgrades_chosen_packages_in_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let orchestrator = Orchestrator::with_runner(
            Toolchain::new(dir.path()),
            OrchestratorConfig::default(),
            HealthySdk::new(),
        );
        let log = DiagnosticLog::in_memory();

        let outcome = orchestrator.run(&AmbiguousOnly, &log).await.unwrap();

        assert_eq!(
            outcome,
            RunOutcome::Upgraded {
                ids: vec!["xunit".to_string()],
                tool: ToolStatus::AlreadyPresent,
            }
        );
        assert_eq!(orchestrator.toolchain().working_dir, dir.path());
    }

    #[tokio::test]
    async fn test_parse_error_reaches_caller() {
        struct BrokenSdk;

        #[async_trait]
        impl CommandRunner for BrokenSdk {
            async fn run(
                &self,
                _invocation: &Invocation,
                _echo: Echo,
                _log: &DiagnosticLog,
            ) -> ProcessOutput {
                ProcessOutput {
                    code: 0,
                    stdout: "{ not json }".to_string(),
                    stderr: String::new(),
                }
            }
        }

        let orchestrator = Orchestrator::with_runner(
            Toolchain::new("."),
            OrchestratorConfig::default(),
            BrokenSdk,
        );
        let log = DiagnosticLog::in_memory();

        let err = orchestrator.run(&AmbiguousOnly, &log).await.unwrap_err();

        assert!(matches!(err, AppError::Payload(_)));
        assert!(log.lines().contains(&"{ not json }".to_string()));
    }
}
