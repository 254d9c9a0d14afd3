use anyhow::Result;
use ndarray::s;
use riskgrid_core::{
    record::BufferedRecorder, util::eval_with_recorder, DefaultEvaluator, Env as _,
    Evaluator as _, Policy,
};
use riskgrid_env::{
    Direction, Pos, RewardSpec, RiskyPathAct, RiskyPathEnv, RiskyPathEnvConfig, TensorObs, Tile,
    CH_AGENT, CH_WALL,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 11x11 room with no lava and a goal far from the start.
fn open_room() -> RiskyPathEnvConfig {
    RiskyPathEnvConfig::default()
        .lava_positions(Some(vec![]))
        .goal_positions(vec![Pos::new(9, 1)])
}

struct SeededRandomPolicy {
    rng: fastrand::Rng,
}

impl SeededRandomPolicy {
    fn new(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Policy<RiskyPathEnv> for SeededRandomPolicy {
    fn sample(&mut self, _: &TensorObs) -> RiskyPathAct {
        RiskyPathAct::ALL[self.rng.usize(..RiskyPathAct::N_ACTIONS)]
    }
}

fn assert_send<T: Send>() {}

#[test]
fn test_env_is_send() {
    assert_send::<RiskyPathEnv>();
    assert_send::<RiskyPathEnvConfig>();
}

#[test]
fn test_agent_stays_in_interior() -> Result<()> {
    init_logger();
    let config = RiskyPathEnvConfig::default()
        .slip_proba(0.3)
        .wall_rebound(true)
        .max_steps(40);
    let mut env = RiskyPathEnv::new(&config)?;
    let mut policy = SeededRandomPolicy::new(11);
    let mut obs = env.reset(None)?;

    for _ in 0..2000 {
        let act = policy.sample(&obs);
        let (step, _) = env.step_with_reset(&act);
        let pos = step.info.agent_pos;
        assert!(pos.x > 0 && pos.x < 10 && pos.y > 0 && pos.y < 10, "{}", pos);
        assert!(env.grid().can_overlap(pos));
        obs = match step.init_obs {
            Some(init_obs) => init_obs,
            None => step.obs,
        };
    }
    Ok(())
}

#[test]
fn test_blocked_move_without_rebound() -> Result<()> {
    let mut env = RiskyPathEnv::new(&open_room())?;
    env.reset(None)?;

    // (2, 10) is the southern wall
    let (step, _) = env.step(&RiskyPathAct::South);
    assert_eq!(step.info.agent_pos, Pos::new(2, 9));
    assert_eq!(step.info.actual_movement_vec, (0, 0));
    assert_eq!(step.info.intended_movement_vec, (0, 1));
    assert_eq!(env.agent_dir(), Direction::South);
    assert!(!step.info.slipped);

    let (step, _) = env.step(&RiskyPathAct::East);
    assert_eq!(step.info.agent_pos, Pos::new(3, 9));
    assert_eq!(step.info.actual_movement_vec, (1, 0));
    Ok(())
}

#[test]
fn test_rebound_to_single_open_neighbour() -> Result<()> {
    init_logger();
    // Two-cell pocket (1, 1)-(2, 1) closed by interior walls
    let config = RiskyPathEnvConfig::default()
        .size(6, 6)
        .agent_start_pos((2, 1))
        .goal_positions(vec![Pos::new(4, 4)])
        .lava_positions(Some(vec![]))
        .wall_positions(vec![Pos::new(1, 2), Pos::new(2, 2), Pos::new(3, 1)])
        .wall_rebound(true);

    for seed in [0, 1, 99] {
        let mut env = RiskyPathEnv::build(&config, seed)?;
        env.reset(None)?;
        assert_eq!(env.grid().get(Pos::new(2, 2)), Tile::Wall);

        for i in 0..10 {
            let (step, _) = env.step(&RiskyPathAct::North);
            let expected = if i % 2 == 0 { Pos::new(1, 1) } else { Pos::new(2, 1) };
            assert_eq!(step.info.agent_pos, expected);
            assert_eq!(step.info.intended_movement_vec, (0, -1));
            assert_eq!(step.info.actual_movement_vec.1, 0);
            assert!(!step.info.slipped);
            assert!(!step.is_done());
            assert_eq!(env.agent_dir(), Direction::North);
        }
    }
    Ok(())
}

#[test]
fn test_trajectory_independent_of_seed_without_randomness() -> Result<()> {
    let acts = [
        RiskyPathAct::North,
        RiskyPathAct::North,
        RiskyPathAct::West,
        RiskyPathAct::West,
        RiskyPathAct::South,
        RiskyPathAct::East,
    ];
    let mut trajectories = vec![];
    for seed in 0..3 {
        let mut env = RiskyPathEnv::build(&open_room(), seed)?;
        env.reset(None)?;
        let trajectory: Vec<Pos> = acts.iter().map(|a| env.step(a).0.info.agent_pos).collect();
        trajectories.push(trajectory);
    }
    assert_eq!(trajectories[0], trajectories[1]);
    assert_eq!(trajectories[0], trajectories[2]);
    Ok(())
}

#[test]
fn test_same_seed_same_trajectory() -> Result<()> {
    let config = RiskyPathEnvConfig::default()
        .slip_proba(0.4)
        .wall_rebound(true)
        .max_steps(30);
    let run = |seed: i64| -> Result<Vec<(Pos, bool, f32)>> {
        let mut env = RiskyPathEnv::build(&config, seed)?;
        let mut policy = SeededRandomPolicy::new(5);
        let mut obs = env.reset(None)?;
        let mut out = vec![];
        for _ in 0..100 {
            let (step, _) = env.step_with_reset(&policy.sample(&obs));
            out.push((step.info.agent_pos, step.info.slipped, step.reward));
            obs = step.init_obs.unwrap_or(step.obs);
        }
        Ok(out)
    };

    assert_eq!(run(42)?, run(42)?);
    assert!(run(42)?.iter().any(|&(_, slipped, _)| slipped));
    Ok(())
}

#[test]
fn test_lava_ends_episode() -> Result<()> {
    init_logger();
    let reward_spec = RewardSpec::default().step_penalty(-0.01).lava_reward(-5.0);
    let config = RiskyPathEnvConfig::default().reward_spec(reward_spec);
    let mut env = RiskyPathEnv::new(&config)?;
    env.reset(None)?;

    for _ in 0..3 {
        let (step, _) = env.step(&RiskyPathAct::North);
        assert!(!step.is_done());
        assert_eq!(step.reward, -0.01);
    }
    assert_eq!(env.agent_pos(), Pos::new(2, 6));

    let (step, record) = env.step(&RiskyPathAct::West);
    assert!(step.is_done());
    assert!(step.is_terminated);
    assert!(!step.is_truncated);
    assert_eq!(step.reward, -0.01 + -5.0);
    assert_eq!(step.info.current_cell_type, Some(Tile::Lava));
    assert_eq!(record.get_string("current_cell_type")?, "lava");
    assert_eq!(record.get_array1("agent_pos")?, vec![1.0, 6.0]);
    assert_eq!(record.get_scalar("step_count")?, 4.0);
    Ok(())
}

#[test]
fn test_goal_ends_episode() -> Result<()> {
    let reward_spec = RewardSpec::default().step_penalty(-0.1).goal_reward(3.0);
    let config = open_room()
        .goal_positions(vec![Pos::new(2, 7)])
        .reward_spec(reward_spec);
    let mut env = RiskyPathEnv::new(&config)?;
    env.reset(None)?;

    let (step, _) = env.step(&RiskyPathAct::North);
    assert!(!step.is_done());
    assert_eq!(step.info.current_cell_type, None);

    let (step, _) = env.step(&RiskyPathAct::North);
    assert!(step.is_terminated);
    assert_eq!(step.reward, -0.1 + 3.0);
    assert_eq!(step.info.current_cell_type, Some(Tile::Goal));
    Ok(())
}

#[test]
fn test_absorbing_lava() -> Result<()> {
    let reward_spec = RewardSpec::default()
        .absorbing_states(true)
        .absorbing_reward_lava(-2.0);
    let config = RiskyPathEnvConfig::default()
        .reward_spec(reward_spec)
        .slip_proba(0.5)
        .wall_rebound(true)
        .max_steps(6);
    let mut env = RiskyPathEnv::new(&config)?;
    env.reset(None)?;

    // Step into lava, retrying until no slip moves the agent elsewhere.
    while env.agent_pos() != Pos::new(1, 9) {
        let (step, _) = env.step(&RiskyPathAct::West);
        assert!(!step.is_terminated);
        if step.is_done() {
            env.reset(None)?;
        }
    }
    assert!(!env.can_move());

    let acts = [RiskyPathAct::East, RiskyPathAct::North, RiskyPathAct::South];
    let mut i = 0;
    while env.step_count() < 6 {
        let act = acts[i % acts.len()];
        i += 1;
        let (step, _) = env.step(&act);
        assert_eq!(step.info.agent_pos, Pos::new(1, 9));
        assert_eq!(env.agent_dir(), act.direction());
        assert!(!step.info.slipped);
        assert_eq!(step.reward, -2.0);
        assert!(!step.is_terminated);
        assert_eq!(step.is_done(), env.step_count() == 6);
        assert_eq!(step.is_truncated, env.step_count() == 6);
    }
    Ok(())
}

#[test]
fn test_absorbing_goal() -> Result<()> {
    let reward_spec = RewardSpec::default()
        .absorbing_states(true)
        .absorbing_reward_goal(0.5);
    let config = open_room()
        .goal_positions(vec![Pos::new(3, 9)])
        .reward_spec(reward_spec)
        .max_steps(10);
    let mut env = RiskyPathEnv::new(&config)?;
    env.reset(None)?;

    for n in 1..=10 {
        let (step, _) = env.step(&RiskyPathAct::East);
        assert_eq!(env.agent_pos(), Pos::new(3, 9));
        assert_eq!(step.reward, 0.5);
        assert_eq!(step.info.current_cell_type, Some(Tile::Goal));
        assert_eq!(step.is_done(), n == 10);
    }
    Ok(())
}

#[test]
fn test_max_steps_cutoff() -> Result<()> {
    let mut env = RiskyPathEnv::new(&open_room().max_steps(7))?;

    for _ in 0..2 {
        env.reset(None)?;
        assert_eq!(env.step_count(), 0);
        for n in 1..=7 {
            let act = if n % 2 == 0 {
                RiskyPathAct::West
            } else {
                RiskyPathAct::East
            };
            let (step, _) = env.step(&act);
            assert_eq!(env.step_count(), n);
            assert!(!step.is_terminated);
            assert_eq!(step.is_truncated, n == 7);
        }
        assert!(env.is_done());
    }
    Ok(())
}

#[test]
fn test_risky_tiles() -> Result<()> {
    let reward_spec = RewardSpec::default()
        .step_penalty(-0.1)
        .risky_tile_reward(-1.0)
        .absorbing_states(true);
    let config = RiskyPathEnvConfig::default()
        .risky_active(true)
        .reward_spec(reward_spec);
    let mut env = RiskyPathEnv::new(&config)?;
    env.reset(None)?;

    let (step, record) = env.step(&RiskyPathAct::North);
    assert_eq!(step.info.agent_pos, Pos::new(2, 8));
    assert_eq!(step.info.current_cell_type, Some(Tile::Risky));
    assert_eq!(step.reward, -0.1 + -1.0);
    assert!(!step.is_done());
    assert_eq!(record.get_string("current_cell_type")?, "risky");

    // Risky tiles do not freeze the agent, even with absorbing states
    assert!(env.can_move());
    let (step, _) = env.step(&RiskyPathAct::North);
    assert_eq!(step.info.agent_pos, Pos::new(2, 7));
    assert_eq!(step.reward, -0.1 + -1.0);
    Ok(())
}

#[test]
fn test_tensor_obs() -> Result<()> {
    for &risky_active in &[false, true] {
        let config = RiskyPathEnvConfig::default()
            .size(9, 12)
            .agent_start_pos((4, 8))
            .risky_active(risky_active);
        let mut env = RiskyPathEnv::new(&config)?;
        let space = env.tensor_obs_space();
        assert_eq!(space.shape, [9, 12, if risky_active { 5 } else { 4 }]);

        let mut obs = env.reset(None)?;
        for act in [RiskyPathAct::North, RiskyPathAct::East, RiskyPathAct::East].iter() {
            assert!(space.contains(&obs));
            let a = obs.array();
            assert_eq!(a.slice(s![.., .., CH_AGENT]).sum(), 1);
            let p = env.agent_pos();
            assert_eq!(a[[p.x as usize, p.y as usize, CH_AGENT]], 1);

            for x in 0..9 {
                for y in 0..12 {
                    let ring = x == 0 || y == 0 || x == 8 || y == 11;
                    assert_eq!(a[[x, y, CH_WALL]] == 1, ring);
                }
            }
            obs = env.step(act).0.obs;
        }
    }
    Ok(())
}

#[test]
fn test_reset_keeps_grid() -> Result<()> {
    let mut env = RiskyPathEnv::new(&RiskyPathEnvConfig::default())?;
    let grid = env.grid().clone();
    env.reset(None)?;
    env.step(&RiskyPathAct::West);
    let obs = env.reset(None)?;

    assert_eq!(env.grid(), &grid);
    assert_eq!(env.agent_pos(), Pos::new(2, 9));
    assert_eq!(env.agent_dir(), Direction::North);
    assert!(!env.is_done());
    assert_eq!(obs, env.tensor_obs());
    Ok(())
}

#[test]
fn test_build_fails_on_invalid_config() {
    let config = RiskyPathEnvConfig::default().agent_start_pos((1, 5));
    let err = RiskyPathEnv::new(&config).err().unwrap();
    assert_eq!(
        err.to_string(),
        "Agent start position (1, 5) is a lava position"
    );
}

#[test]
fn test_evaluation() -> Result<()> {
    init_logger();
    let config = RiskyPathEnvConfig::default()
        .reward_spec(RewardSpec::default().step_penalty(-0.01))
        .max_steps(20);

    let record = DefaultEvaluator::<RiskyPathEnv>::new(&config, 0, 4)?
        .evaluate(&mut SeededRandomPolicy::new(1))?;
    let length = record.get_scalar("Episode length")?;
    assert!(length >= 1.0 && length <= 20.0);

    let mut env = RiskyPathEnv::new(&config)?;
    let mut recorder = BufferedRecorder::new();
    let rs = eval_with_recorder(&mut env, &mut SeededRandomPolicy::new(2), 3, &mut recorder)?;
    assert_eq!(rs.len(), 3);
    assert!(recorder.len() >= 3);
    assert!(recorder
        .iter()
        .all(|r| r.get_string("current_cell_type").is_ok()));
    Ok(())
}
