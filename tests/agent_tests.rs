#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use flappy_evo::simulation::agent::{Agent, DEFAULT_MUTATION_RATE, DEFAULT_TOPOLOGY, JUMP_FORCE};
use flappy_evo::simulation::brain::Brain;
use flappy_evo::simulation::error::EvoError;
use geo::Coord;
use ndarray::{Array1, Array2, array};
use ndarray_rand::rand::SeedableRng;
use ndarray_rand::rand::rngs::StdRng;

/// A `[3, 1]` brain whose single output is `sigmoid(bias)`.
fn constant_brain(bias: f32) -> Brain {
    Brain::from_parameters(vec![Array2::zeros((3, 1))], vec![array![bias]]).unwrap()
}

fn always_jumps() -> Agent {
    Agent::new(constant_brain(5.0))
}

fn never_jumps() -> Agent {
    Agent::new(constant_brain(-5.0))
}

#[test]
fn test_agent_defaults() {
    let agent = Agent::new_random(&DEFAULT_TOPOLOGY, &mut StdRng::seed_from_u64(1)).unwrap();

    assert_eq!(agent.brain().topology(), &[3, 3, 3, 1]);
    assert_eq!(agent.pos, Coord { x: 0.0, y: 0.0 });
    assert_eq!(agent.velocity, 0.0);
    assert!(agent.active);
    assert_eq!(agent.fitness, 0.0);
    assert_eq!(agent.milestones, 0);
}

#[test]
fn test_decide_without_jump_applies_gravity() {
    let mut agent = never_jumps();
    agent.velocity = 1.0;

    agent.decide(&array![0.0, 0.0, 0.0], 0.25, JUMP_FORCE).unwrap();
    assert_eq!(agent.velocity, 1.25);

    agent.decide(&array![0.0, 0.0, 0.0], 0.25, JUMP_FORCE).unwrap();
    assert_eq!(agent.velocity, 1.5);
}

#[test]
fn test_jump_overrides_gravity() {
    let mut agent = always_jumps();
    agent.velocity = 7.0;

    agent.decide(&array![0.0, 0.0, 0.0], 0.25, JUMP_FORCE).unwrap();
    assert_eq!(agent.velocity, -4.0);
}

#[test]
fn test_output_of_exactly_one_half_does_not_jump() {
    let mut agent = Agent::new(constant_brain(0.0));

    agent.decide(&array![1.0, 2.0, 3.0], 0.5, JUMP_FORCE).unwrap();
    assert_eq!(agent.velocity, 0.5);
}

#[test]
fn test_decide_rejects_wrong_input_width_without_side_effects() {
    let mut agent = never_jumps();
    agent.velocity = 2.0;

    let result = agent.decide(&array![0.0, 0.0], 0.25, JUMP_FORCE);
    assert!(matches!(result, Err(EvoError::DimensionMismatch { .. })));
    assert_eq!(agent.velocity, 2.0);
}

#[test]
fn test_apply_motion_moves_vertically() {
    let mut agent = always_jumps();
    agent.reset(Coord { x: 20.0, y: 300.0 }, 0.0);

    agent.decide(&Array1::zeros(3), 0.25, JUMP_FORCE).unwrap();
    agent.apply_motion();

    assert_eq!(agent.pos, Coord { x: 20.0, y: 296.0 });
}

#[test]
fn test_clamp_velocity() {
    let mut agent = never_jumps();
    agent.velocity = 25.0;
    agent.clamp_velocity(10.0);
    assert_eq!(agent.velocity, 10.0);

    agent.velocity = -12.0;
    agent.clamp_velocity(10.0);
    assert_eq!(agent.velocity, -10.0);
}

#[test]
fn test_inactive_agent_is_frozen() {
    let mut agent = always_jumps();
    agent.reset(Coord { x: 20.0, y: 100.0 }, 3.0);
    agent.reward(5.0);
    agent.pass_milestone();
    agent.deactivate();

    agent.decide(&Array1::zeros(3), 0.25, JUMP_FORCE).unwrap();
    agent.apply_motion();
    agent.clamp_velocity(1.0);
    agent.reward(1.0);
    agent.pass_milestone();

    assert!(!agent.active);
    assert_eq!(agent.pos, Coord { x: 20.0, y: 100.0 });
    assert_eq!(agent.velocity, 3.0);
    assert_eq!(agent.fitness, 5.0);
    assert_eq!(agent.milestones, 1);
}

#[test]
fn test_reward_never_lowers_fitness() {
    let mut agent = never_jumps();
    agent.reward(4.0);

    for amount in [-1.0, -0.0, f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
        agent.reward(amount);
        assert_eq!(agent.fitness, 4.0, "reward {amount} changed fitness");
    }

    agent.reward(0.5);
    assert_eq!(agent.fitness, 4.5);
}

#[test]
fn test_reset_is_idempotent_and_keeps_brain() {
    let mut agent = Agent::new_random(&DEFAULT_TOPOLOGY, &mut StdRng::seed_from_u64(2)).unwrap();
    let brain_before = agent.brain().clone();
    let brain_ptr = std::ptr::from_ref(agent.brain());

    agent.reward(12.0);
    agent.pass_milestone();
    agent.deactivate();

    let start = Coord { x: 20.0, y: 300.0 };
    agent.reset(start, 0.5);
    let first = (agent.pos, agent.velocity, agent.active, agent.fitness, agent.milestones);
    agent.reset(start, 0.5);
    let second = (agent.pos, agent.velocity, agent.active, agent.fitness, agent.milestones);

    assert_eq!(first, second);
    assert_eq!(first, (start, 0.5, true, 0.0, 0));
    assert_eq!(agent.brain(), &brain_before);
    assert_eq!(std::ptr::from_ref(agent.brain()), brain_ptr);
}

#[test]
fn test_fresh_copy_has_same_brain_and_default_state() {
    let mut agent = Agent::new_random(&DEFAULT_TOPOLOGY, &mut StdRng::seed_from_u64(3)).unwrap();
    agent.reset(Coord { x: 20.0, y: 150.0 }, 2.0);
    agent.reward(40.0);
    agent.pass_milestone();
    agent.deactivate();

    let copy = agent.fresh_copy();

    assert_eq!(copy.brain(), agent.brain());
    assert_eq!(copy.pos, Coord { x: 0.0, y: 0.0 });
    assert_eq!(copy.velocity, 0.0);
    assert!(copy.active);
    assert_eq!(copy.fitness, 0.0);
    assert_eq!(copy.milestones, 0);
}

#[test]
fn test_reproduce_mutates_a_copy() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut parent = Agent::new_random(&DEFAULT_TOPOLOGY, &mut rng).unwrap();
    parent.reward(10.0);
    let parent_brain = parent.brain().clone();

    let child = parent.reproduce(DEFAULT_MUTATION_RATE, &mut rng);

    assert_eq!(parent.brain(), &parent_brain);
    assert_eq!(child.brain().topology(), parent.brain().topology());
    let distance = Brain::distance(child.brain(), parent.brain());
    assert!(distance > 0.0 && distance < 0.5, "distance {distance}");
    assert_eq!(child.fitness, 0.0);
    assert_eq!(child.milestones, 0);
    assert!(child.active);
}
