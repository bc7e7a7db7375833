use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::HarnessArgs;
use crate::error::{AppError, AppResult, ValidationError};
use crate::runner::RunContext;
use crate::scenarios::{self, Scenario};

enum RunPlan {
    ListScenarios,
    Run(Box<HarnessArgs>),
}

pub(crate) fn run() -> AppResult<()> {
    let (mut args, matches) = parse_args()?;
    crate::logger::init_logging(args.verbose);

    if let Some(config) = crate::config::load_config(args.config.as_deref())? {
        crate::config::apply_config(&mut args, &matches, &config)?;
    }

    match build_plan(args) {
        RunPlan::ListScenarios => {
            for name in scenarios::scenario_names() {
                println!("{}", name);
            }
            Ok(())
        }
        RunPlan::Run(args) => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(run_harness(&args))
        }
    }
}

fn parse_args() -> AppResult<(HarnessArgs, ArgMatches)> {
    let cmd = HarnessArgs::command();
    let matches = cmd.get_matches();
    let args = HarnessArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

fn build_plan(args: HarnessArgs) -> RunPlan {
    if args.list_scenarios {
        return RunPlan::ListScenarios;
    }
    RunPlan::Run(Box::new(args))
}

async fn run_harness(args: &HarnessArgs) -> AppResult<()> {
    let selected = select_scenarios(args)?;
    let mut ctx = RunContext::new(args)?;

    let mut failed_scenarios: Vec<&'static str> = Vec::new();
    for scenario in &selected {
        if !ctx.run_scenario(scenario).await? {
            failed_scenarios.push(scenario.name);
        }
    }

    ctx.print_summary();
    ctx.write_artifact(&args.diff_output)?;

    if failed_scenarios.is_empty() {
        return Ok(());
    }
    tracing::error!(scenarios = ?failed_scenarios, "non-advisory scenarios failed");
    Err(AppError::validation(ValidationError::ScenariosFailed {
        failed: failed_scenarios.len(),
    }))
}

fn select_scenarios(args: &HarnessArgs) -> AppResult<Vec<Scenario>> {
    let mut all = scenarios::library();

    if !args.scenarios.is_empty() {
        for name in &args.scenarios {
            if !all.iter().any(|scenario| scenario.name == name.as_str()) {
                return Err(AppError::validation(ValidationError::UnknownScenario {
                    name: name.clone(),
                }));
            }
        }
        all.retain(|scenario| args.scenarios.iter().any(|name| name == scenario.name));
    }

    if args.skip_cmp {
        all.retain(|scenario| !scenario.requires_oracle);
    }

    if all.is_empty() {
        return Err(AppError::validation(ValidationError::NoScenariosSelected));
    }
    Ok(all)
}
