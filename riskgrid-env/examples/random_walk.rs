use anyhow::Result;
use clap::Parser;
use riskgrid_core::{
    record::BufferedRecorder, util::eval_with_recorder, Configurable, DefaultEvaluator,
    Evaluator as _, Policy,
};
use riskgrid_env::{RiskyPathAct, RiskyPathEnv, RiskyPathEnvConfig, TensorObs};
use serde::Deserialize;

type Env = RiskyPathEnv;
type EnvConfig = RiskyPathEnvConfig;

/// Run a random policy in the RiskyPath grid world
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// YAML file with the environment configuration
    #[arg(short, long)]
    config: Option<String>,

    /// Number of evaluation episodes
    #[arg(short = 'n', long, default_value_t = 5)]
    n_episodes: usize,

    /// Slip probability, overrides the configuration file
    #[arg(long)]
    slip_proba: Option<f64>,

    /// Enable wall rebound
    #[arg(long, default_value_t = false)]
    wall_rebound: bool,

    /// Seed of the environment
    #[arg(long, default_value_t = 42)]
    seed: i64,

    /// Save the effective configuration to this YAML file
    #[arg(long)]
    save_config: Option<String>,
}

#[derive(Clone, Deserialize)]
struct RandomPolicyConfig {
    pub seed: u64,
}

struct RandomPolicy {
    rng: fastrand::Rng,
}

impl Policy<Env> for RandomPolicy {
    fn sample(&mut self, _: &TensorObs) -> RiskyPathAct {
        RiskyPathAct::ALL[self.rng.usize(..RiskyPathAct::N_ACTIONS)]
    }
}

impl Configurable<Env> for RandomPolicy {
    type Config = RandomPolicyConfig;

    fn build(config: Self::Config) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(config.seed),
        }
    }
}

fn env_config(args: &Args) -> Result<EnvConfig> {
    let mut config = match &args.config {
        Some(path) => EnvConfig::load(path)?,
        None => EnvConfig::default(),
    };
    if let Some(slip_proba) = args.slip_proba {
        config = config.slip_proba(slip_proba);
    }
    if args.wall_rebound {
        config = config.wall_rebound(true);
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let env_config = env_config(&args)?;
    if let Some(path) = &args.save_config {
        env_config.save(path)?;
    }

    let mut policy = RandomPolicy::build(RandomPolicyConfig {
        seed: args.seed as u64,
    });

    // Runs evaluation
    let record = DefaultEvaluator::<Env>::new(&env_config, args.seed, args.n_episodes)?
        .evaluate(&mut policy)?;
    log::info!(
        "Average return = {}, average length = {}",
        record.get_scalar("Episode return")?,
        record.get_scalar("Episode length")?
    );

    // Replays one episode and prints the cells visited
    let mut env = <Env as riskgrid_core::Env>::build(&env_config, args.seed)?;
    let mut recorder = BufferedRecorder::new();
    let rs = eval_with_recorder(&mut env, &mut policy, 1, &mut recorder)?;
    for record in recorder.iter() {
        println!(
            "step {:>3}: {:?} {}",
            record.get_scalar("step")?,
            record.get_array1("agent_pos")?,
            record.get_string("current_cell_type")?
        );
    }
    println!("return = {}", rs[0]);

    Ok(())
}
