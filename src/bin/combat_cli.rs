//! Scenario-driven CLI (§1.4/§4 Component N). Loads a JSON scenario
//! describing a grid, creatures, initiative order, and a sequence of
//! actions; validates and applies each action in turn, printing the
//! resulting events as JSON lines. Scoped to the engine's actual
//! operations, unlike the reference simulator's `sim_cli`, which drove
//! batch DPR simulation and balancing passes this engine does not have.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Deserialize;

use combat_core::action::{ActionContext, GameAction, ReadiedAction, ValidationResult};
use combat_core::creature::Creature;
use combat_core::dice::DiceEngine;
use combat_core::events::Event;
use combat_core::grid::MapGrid;
use combat_core::initiative::{self, InitiativeEntry};
use combat_core::values::{Abilities, CreatureId, GridPos};
use combat_core::{handlers, validation};

#[derive(Parser, Debug)]
#[command(name = "combat_cli", about = "Run a tactical combat scenario and print its event log")]
struct Cli {
    /// Path to a scenario JSON file.
    scenario: PathBuf,

    /// PRNG seed; overrides the scenario file's `seed` field when given.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ScenarioCreature {
    id: CreatureId,
    name: String,
    armor_class: i32,
    hp: i32,
    speed: u32,
    proficiency_bonus: u32,
    abilities: (i32, i32, i32, i32, i32, i32),
    position: (i32, i32),
    initiative_roll: i32,
    initiative_modifier: i32,
}

#[derive(Debug, Deserialize)]
struct Scenario {
    seed: u64,
    width: u16,
    height: u16,
    #[serde(default)]
    obstacles: Vec<(i32, i32)>,
    creatures: Vec<ScenarioCreature>,
    #[serde(default)]
    surprised: Vec<CreatureId>,
    actions: Vec<GameAction>,
}

fn load_scenario(path: &PathBuf) -> Result<Scenario, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("reading {}: {e}", path.display()))?;
    serde_json::from_str(&text).map_err(|e| format!("parsing {}: {e}", path.display()))
}

fn run(cli: Cli) -> Result<(), String> {
    let scenario = load_scenario(&cli.scenario)?;
    let seed = cli.seed.unwrap_or(scenario.seed);
    let mut dice = DiceEngine::new(seed);

    let mut grid = MapGrid::new(scenario.width, scenario.height)
        .map_err(|e| format!("invalid grid: {e}"))?;
    for (x, y) in &scenario.obstacles {
        grid.set_cell(
            GridPos::new(*x, *y),
            combat_core::grid::CellProperties {
                has_obstacle: true,
                ..Default::default()
            },
        );
    }

    let mut creatures: HashMap<CreatureId, Creature> = HashMap::new();
    let mut entries = Vec::new();
    for spec in &scenario.creatures {
        let (str_, dex, con, int, wis, cha) = spec.abilities;
        let abilities = Abilities::new(str_, dex, con, int, wis, cha)
            .map_err(|e| format!("creature {}: {e}", spec.id))?;
        let creature = Creature::new(
            spec.id,
            spec.name.clone(),
            spec.armor_class,
            spec.hp,
            spec.hp,
            spec.speed,
            spec.proficiency_bonus,
            abilities,
            GridPos::new(spec.position.0, spec.position.1),
        )
        .map_err(|e| format!("creature {}: {e}", spec.id))?;
        creatures.insert(spec.id, creature);
        entries.push(InitiativeEntry::new(
            spec.id,
            spec.initiative_roll,
            spec.initiative_modifier,
        ));
    }

    let session_id = 1;
    let surprised = scenario.surprised.iter().copied().collect();
    let mut round_state =
        initiative::initialize(entries, surprised).map_err(|e| format!("initiative: {e}"))?;

    let mut log: Vec<Event> = Vec::new();
    log.push(Event::EncounterStarted {
        session_id,
        timestamp: 0,
        initiative_order: round_state.initiative_order.clone(),
        surprised_creatures: scenario.surprised.clone(),
    });

    let readied: HashMap<CreatureId, ReadiedAction> = HashMap::new();
    let mut timestamp = 1i64;

    for action in &scenario.actions {
        let actor_id = action.actor_id();
        let turn_phase = match &round_state.current_turn {
            Some(turn) if turn.active_creature_id == actor_id => turn.turn_phase,
            _ => {
                log::warn!("skipping action for {actor_id}: not their turn");
                continue;
            }
        };

        let ctx = ActionContext {
            session_id,
            round_number: round_state.round_number,
            turn_phase: &turn_phase,
            creatures: &creatures,
            grid: &grid,
            readied_actions: &readied,
            bonus_action_spell_cast_this_turn: false,
        };

        match validation::validate_action(action, &ctx) {
            ValidationResult::Valid => {
                let (events, new_phase) = handlers::dispatch(
                    session_id,
                    timestamp,
                    action,
                    &turn_phase,
                    &grid,
                    &mut creatures,
                    &mut dice,
                );
                for event in &events {
                    println!("{}", serde_json::to_string(event).map_err(|e| e.to_string())?);
                }
                log.extend(events);
                if let Some(turn) = &mut round_state.current_turn {
                    turn.turn_phase = new_phase;
                }
            }
            ValidationResult::Invalid { reason } => {
                log::warn!("action by {actor_id} rejected: {reason}");
            }
            ValidationResult::RequiresChoice { .. } => {
                log::warn!("action by {actor_id} under-specified, skipping in batch mode");
            }
        }
        timestamp += 1;
    }

    log::info!("scenario complete: {} events recorded", log.len());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}
