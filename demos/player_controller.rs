//! Player Controller
//!
//! This example drives a first-person player brain through a scripted
//! sequence of frames.
//!
//! Key concepts:
//! - Idle/Walk local transitions guarded by move input
//! - A global Jump transition that preempts everything else
//! - Update, fixed update and late update phases per frame
//! - State changes logged through `tracing`
//!
//! Run with: RUST_LOG=tickstate=debug cargo run --example player_controller

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tickstate::builder::StateMachineBuilder;
use tickstate::core::{Predicate, State, StateHandle};
use tickstate::machine::{MachineError, StateMachine};
use tickstate::state_kind;
use tracing_subscriber::EnvFilter;

state_kind! {
    enum PlayerKind {
        Idle,
        Walk,
        Jump,
    }
}

#[derive(Default)]
struct Input {
    move_input: Cell<(f32, f32)>,
    jump: Cell<bool>,
}

#[derive(Default)]
struct Motor {
    position: (f32, f32),
    height: f32,
    vertical_speed: f32,
}

const WALK_SPEED: f32 = 5.0;
const JUMP_FORCE: f32 = 5.0;
const GRAVITY: f32 = -9.81;
const FIXED_DT: f32 = 0.02;

struct Idle;

impl State for Idle {
    fn on_enter(&mut self) {
        println!("  -> Idle");
    }
}

struct Walk {
    input: Rc<Input>,
    motor: Rc<RefCell<Motor>>,
}

impl State for Walk {
    fn on_enter(&mut self) {
        println!("  -> Walk");
    }

    fn fixed_update(&mut self) {
        let (x, y) = self.input.move_input.get();
        let mut motor = self.motor.borrow_mut();
        motor.position.0 += x * WALK_SPEED * FIXED_DT;
        motor.position.1 += y * WALK_SPEED * FIXED_DT;
    }
}

struct Jump {
    motor: Rc<RefCell<Motor>>,
}

impl State for Jump {
    fn on_enter(&mut self) {
        println!("  -> Jump");
        self.motor.borrow_mut().vertical_speed = JUMP_FORCE;
    }

    fn fixed_update(&mut self) {
        let mut motor = self.motor.borrow_mut();
        motor.vertical_speed += GRAVITY * FIXED_DT;
        motor.height = (motor.height + motor.vertical_speed * FIXED_DT).max(0.0);
    }

    fn on_exit(&mut self) {
        let mut motor = self.motor.borrow_mut();
        motor.height = 0.0;
        motor.vertical_speed = 0.0;
    }
}

fn run_frame(machine: &mut StateMachine<PlayerKind>) -> Result<(), MachineError> {
    machine.update_state()?;
    machine.fixed_update_state()?;
    machine.late_update_state()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Player Controller ===\n");

    let input = Rc::new(Input::default());
    let motor = Rc::new(RefCell::new(Motor::default()));

    let idle = StateHandle::new(PlayerKind::Idle, Idle);
    let walk = StateHandle::new(
        PlayerKind::Walk,
        Walk {
            input: input.clone(),
            motor: motor.clone(),
        },
    );
    let jump = StateHandle::new(
        PlayerKind::Jump,
        Jump {
            motor: motor.clone(),
        },
    );

    let moving = {
        let input = input.clone();
        Predicate::new(move || input.move_input.get() != (0.0, 0.0))
    };
    let grounded = {
        let motor = motor.clone();
        Predicate::new(move || motor.borrow().height <= 0.0)
    };
    let jumping = {
        let input = input.clone();
        Predicate::new(move || input.jump.get())
    }
    .and(&grounded);
    let falling = {
        let motor = motor.clone();
        Predicate::new(move || motor.borrow().vertical_speed < 0.0)
    };

    let mut machine = match StateMachineBuilder::new()
        .any(&jump, jumping)
        .at(&idle, &walk, moving.clone())
        .at(&walk, &idle, moving.negate())
        .at(&jump, &idle, grounded.and(&falling))
        .initial(PlayerKind::Idle)
        .build()
    {
        Ok(machine) => machine,
        Err(e) => {
            eprintln!("failed to wire player brain: {e}");
            return;
        }
    };

    let script: [((f32, f32), bool, u32); 4] = [
        ((0.0, 0.0), false, 5),
        ((1.0, 0.0), false, 20),
        ((1.0, 0.0), true, 1),
        ((0.0, 0.0), false, 80),
    ];

    for (move_input, jump_pressed, frames) in script {
        input.move_input.set(move_input);
        input.jump.set(jump_pressed);
        for _ in 0..frames {
            if let Err(e) = run_frame(&mut machine) {
                eprintln!("tick failed: {e}");
                return;
            }
        }
    }

    let motor = motor.borrow();
    println!(
        "\nFinal state: {:?} at ({:.2}, {:.2}) after {} ticks",
        machine.current_kind(),
        motor.position.0,
        motor.position.1,
        machine.tick()
    );

    println!("\nVisited:");
    for kind in machine.history().get_path() {
        println!("  {:?}", kind);
    }

    println!("\n=== Example Complete ===");
}
