use simvest::AppCommand;
use simvest::core::simulation::{RateMode, Simulation, SimulationUpdate};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::info;

// Each test gets its own config file and workspace directory
mod test_utils {
    use super::*;

    pub struct TestEnv {
        pub dir: TempDir,
        pub config_path: PathBuf,
    }

    impl TestEnv {
        pub fn new(extra_config: &str) -> Self {
            let dir = TempDir::new().expect("Failed to create temp dir");
            let config_path = dir.path().join("config.yaml");
            let config_content = format!(
                "data_path: \"{}\"\n{}",
                dir.path().join("workspace").display(),
                extra_config
            );
            fs::write(&config_path, config_content).expect("Failed to write config file");
            Self { dir, config_path }
        }

        pub fn run(&self, command: AppCommand) -> anyhow::Result<()> {
            simvest::run_command(command, Some(self.config_path.to_str().unwrap()))
        }

        pub fn workspace(&self) -> PathBuf {
            self.dir.path().join("workspace")
        }

        pub fn record(&self, id: &str) -> Simulation {
            read_json(&self.workspace().join(format!("{id}.json")))
        }
    }

    pub fn read_json(path: &Path) -> Simulation {
        let content = fs::read_to_string(path).expect("Failed to read simulation file");
        serde_json::from_str(&content).expect("Failed to parse simulation file")
    }
}

use test_utils::TestEnv;

fn create(env: &TestEnv, name: &str, update: SimulationUpdate) -> anyhow::Result<()> {
    env.run(AppCommand::Create {
        name: name.to_string(),
        update,
    })
}

#[test_log::test]
fn test_full_app_flow() {
    let env = TestEnv::new("");

    create(&env, "Emergency fund", SimulationUpdate::default()).expect("create failed");
    let record = env.record("SIM0001");
    assert_eq!(record.name, "Emergency fund");
    assert_eq!(record.term_months, 12);
    assert!(record.monthly_results.is_empty());

    env.run(AppCommand::Calculate {
        id: "SIM0001".to_string(),
    })
    .expect("calculate failed");

    let record = env.record("SIM0001");
    assert_eq!(record.monthly_results.len(), 12);
    let first = &record.monthly_results[0];
    assert_eq!(format!("{:.2}", first.interest_this_month), "10.00");
    assert_eq!(format!("{:.2}", first.ending_balance), "1010.00");
    let last = record.monthly_results.last().unwrap();
    assert_eq!(format!("{:.2}", last.ending_balance), "1126.83");
    info!(balance = last.ending_balance, "Final balance");

    env.run(AppCommand::Show {
        id: "SIM0001".to_string(),
    })
    .expect("show failed");
    env.run(AppCommand::List).expect("list failed");
}

#[test_log::test]
fn test_invalid_update_is_persisted_and_reported() {
    let env = TestEnv::new("");
    create(&env, "Plan", SimulationUpdate::default()).unwrap();
    env.run(AppCommand::Calculate {
        id: "SIM0001".to_string(),
    })
    .unwrap();

    let result = env.run(AppCommand::Update {
        id: "SIM0001".to_string(),
        update: SimulationUpdate {
            initial_contribution: Some(0.0),
            term_months: Some(500),
            ..SimulationUpdate::default()
        },
    });
    let err = result.expect_err("update should report validation errors");
    assert!(err.to_string().contains("2 validation error(s)"));

    let record = env.record("SIM0001");
    assert_eq!(record.initial_contribution, 0.0);
    assert_eq!(record.term_months, 500);
    assert!(record.monthly_results.is_empty());
    assert_eq!(record.change_log.len(), 2);

    assert!(
        env.run(AppCommand::Calculate {
            id: "SIM0001".to_string()
        })
        .is_err()
    );
}

#[test_log::test]
fn test_variable_rates_flow() {
    let env = TestEnv::new("");
    let mut update = SimulationUpdate::variable_rates(vec![1.0, 2.0, 0.5]);
    update.term_months = Some(3);
    update.monthly_contribution = Some(100.0);
    create(&env, "Variable", update).unwrap();

    env.run(AppCommand::Calculate {
        id: "SIM0001".to_string(),
    })
    .unwrap();

    let record = env.record("SIM0001");
    assert_eq!(record.rate_mode, RateMode::Variable);
    assert_eq!(record.monthly_results.len(), 3);
    assert_eq!(record.monthly_results[2].cumulative_contributed, 1300.0);
}

#[test_log::test]
fn test_compare_requires_calculated_simulations() {
    let env = TestEnv::new("");
    create(&env, "Low", SimulationUpdate::fixed_rate(0.5)).unwrap();
    create(&env, "High", SimulationUpdate::fixed_rate(1.5)).unwrap();
    env.run(AppCommand::Calculate {
        id: "SIM0001".to_string(),
    })
    .unwrap();

    let ids = vec!["SIM0001".to_string(), "SIM0002".to_string()];
    let err = env
        .run(AppCommand::Compare { ids: ids.clone() })
        .expect_err("comparison with one calculated simulation should fail");
    assert!(err.to_string().contains("found 1"));

    env.run(AppCommand::Calculate {
        id: "SIM0002".to_string(),
    })
    .unwrap();
    env.run(AppCommand::Compare { ids }).expect("compare failed");
}

#[test_log::test]
fn test_rename_and_delete() {
    let env = TestEnv::new("");
    create(&env, "Old name", SimulationUpdate::default()).unwrap();
    env.run(AppCommand::Calculate {
        id: "SIM0001".to_string(),
    })
    .unwrap();

    env.run(AppCommand::Rename {
        id: "SIM0001".to_string(),
        name: "New name".to_string(),
    })
    .unwrap();
    let record = env.record("SIM0001");
    assert_eq!(record.name, "New name");
    assert!(record.is_calculated());

    env.run(AppCommand::Delete {
        id: "SIM0001".to_string(),
    })
    .unwrap();
    assert!(!env.workspace().join("SIM0001.json").exists());
    assert!(
        env.run(AppCommand::Delete {
            id: "SIM0001".to_string()
        })
        .is_err()
    );

    // Deleted ids stay retired across runs.
    create(&env, "Fresh", SimulationUpdate::default()).unwrap();
    assert!(!env.workspace().join("SIM0001.json").exists());
    assert_eq!(env.record("SIM0002").name, "Fresh");
}

#[test_log::test]
fn test_save_load_and_export() {
    let env = TestEnv::new("export:\n  delimiter: \";\"\n");
    create(&env, "Plan", SimulationUpdate::contributions(2000.0, 100.0)).unwrap();
    env.run(AppCommand::Calculate {
        id: "SIM0001".to_string(),
    })
    .unwrap();

    let saved = env.dir.path().join("plan.json");
    env.run(AppCommand::Save {
        id: "SIM0001".to_string(),
        path: saved.clone(),
    })
    .unwrap();
    let original = test_utils::read_json(&saved);
    assert_eq!(original, env.record("SIM0001"));

    // SIM0001 is taken in the workspace, so the loaded copy gets a fresh id.
    env.run(AppCommand::Load { path: saved }).unwrap();
    let mut copy = env.record("SIM0002");
    copy.id = original.id.clone();
    assert_eq!(copy, original);

    let table = env.dir.path().join("plan.csv");
    env.run(AppCommand::Export {
        id: "SIM0001".to_string(),
        path: table.clone(),
    })
    .unwrap();
    let content = fs::read_to_string(&table).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 13);
    assert!(lines[0].starts_with("month_index;contribution_this_month;"));
    assert!(lines[1].starts_with("1;100.00;2100.00;20.00;"));
}

#[test_log::test]
fn test_backup_inside_workspace_leaves_records_alone() {
    let env = TestEnv::new("");
    create(&env, "Alpha", SimulationUpdate::default()).unwrap();
    create(&env, "Bravo", SimulationUpdate::default()).unwrap();

    let backup = env.workspace().join("SIM0001_backup.json");
    env.run(AppCommand::Save {
        id: "SIM0001".to_string(),
        path: backup.clone(),
    })
    .unwrap();

    env.run(AppCommand::List).unwrap();
    env.run(AppCommand::List).unwrap();
    assert_eq!(env.record("SIM0001").name, "Alpha");
    assert_eq!(env.record("SIM0002").name, "Bravo");
    assert_eq!(test_utils::read_json(&backup).name, "Alpha");
    assert!(!env.workspace().join("SIM0003.json").exists());
}

#[test_log::test]
fn test_configured_defaults_and_ids() {
    let env = TestEnv::new(
        r#"
ids:
  prefix: "PLAN"
  width: 2
defaults:
  initial_contribution: 5000.0
  term_months: 60
"#,
    );
    create(&env, "Configured", SimulationUpdate::default()).unwrap();

    let record = env.record("PLAN01");
    assert_eq!(record.initial_contribution, 5000.0);
    assert_eq!(record.term_months, 60);
    assert_eq!(record.fixed_rate_percent, Some(1.0));
}

#[test_log::test]
fn test_unknown_simulation() {
    let env = TestEnv::new("");
    let err = env
        .run(AppCommand::Show {
            id: "SIM0042".to_string(),
        })
        .expect_err("show of unknown id should fail");
    assert!(err.to_string().contains("SIM0042 not found"));
}
