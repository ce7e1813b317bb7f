//! Kernel lifecycle: start, completion, busy rejection, cooperative
//! cancellation, and reproducibility under fixed seeds.

use doko_bot::{
    ActionKernel, ActionKernelOptions, ContractKernel, ContractKernelOptions, Executor,
    InlineExecutor, KernelError,
};
use doko_core::game::contract::Contract;
use doko_core::model::card::Card;
use doko_core::model::deck::Deck;
use doko_core::model::face::Face;
use doko_core::model::hand::Hand;
use doko_core::model::player::Seat;
use doko_core::model::suit::Suit;
use std::cell::RefCell;
use std::sync::mpsc;

/// Holds posted work until the test decides to run it.
#[derive(Default)]
struct DeferredExecutor {
    tasks: RefCell<Vec<Box<dyn FnOnce() + Send + 'static>>>,
}

impl Executor for DeferredExecutor {
    fn post(&self, task: Box<dyn FnOnce() + Send + 'static>) {
        self.tasks.borrow_mut().push(task);
    }
}

impl DeferredExecutor {
    fn run_all(&self) {
        let tasks: Vec<_> = self.tasks.borrow_mut().drain(..).collect();
        for task in tasks {
            task();
        }
    }
}

fn tiny_action_options() -> ActionKernelOptions {
    ActionKernelOptions {
        n_trees: 2,
        n_rollouts: 40,
        batch_size: 10,
        ..ActionKernelOptions::default()
    }
}

#[test]
fn action_kernel_delivers_the_most_visited_action() {
    let hands = Deck::shuffled_with_seed(31).deal();
    let kernel = ActionKernel::with_seed(tiny_action_options(), 1);
    let (sender, receiver) = mpsc::channel();
    kernel
        .async_rollout(
            &InlineExecutor,
            Contract::Normal,
            Seat::First,
            hands[0].clone(),
            Vec::new(),
            move |result| sender.send(result).expect("test channel open"),
        )
        .expect("kernel idle");
    let stats = receiver
        .recv()
        .expect("completion delivered")
        .expect("computation finishes");
    let best = stats.best_action().expect("root has children");
    assert_eq!(best.seat(), Seat::First);
    assert!(hands[0].contains(best.as_card().expect("card action")));
    // Every rollout but the expanding first of each tree descends through
    // one root child.
    let total: u64 = stats.visits().iter().sum();
    assert_eq!(total, 2 * (40 - 1));
    assert!(!kernel.is_running());
}

#[test]
fn busy_kernel_rejects_a_second_start() {
    let hands = Deck::shuffled_with_seed(32).deal();
    let kernel = ActionKernel::with_seed(tiny_action_options(), 2);
    let executor = DeferredExecutor::default();
    let (sender, receiver) = mpsc::channel();
    let first_sender = sender.clone();
    kernel
        .async_rollout(
            &executor,
            Contract::Normal,
            Seat::First,
            hands[0].clone(),
            Vec::new(),
            move |result| first_sender.send(result).expect("test channel open"),
        )
        .expect("kernel idle");
    assert!(kernel.is_running());
    let second = kernel.async_rollout(
        &executor,
        Contract::Normal,
        Seat::First,
        hands[0].clone(),
        Vec::new(),
        move |result| sender.send(result).expect("test channel open"),
    );
    assert!(matches!(second, Err(KernelError::AlreadyRunning)));
    executor.run_all();
    assert!(receiver.recv().expect("completion delivered").is_ok());
    assert!(!kernel.is_running());
}

#[test]
fn cancellation_aborts_before_the_next_batch() {
    let hands = Deck::shuffled_with_seed(33).deal();
    let kernel = ActionKernel::with_seed(tiny_action_options(), 3);
    let executor = DeferredExecutor::default();
    let (sender, receiver) = mpsc::channel();
    kernel
        .async_rollout(
            &executor,
            Contract::Normal,
            Seat::First,
            hands[0].clone(),
            Vec::new(),
            move |result| sender.send(result).expect("test channel open"),
        )
        .expect("kernel idle");
    assert!(kernel.cancel());
    assert!(!kernel.cancel(), "second cancel finds nothing to stop");
    executor.run_all();
    let result = receiver.recv().expect("completion delivered");
    assert!(matches!(result, Err(KernelError::Aborted)));
    assert!(!kernel.is_running());
}

#[test]
fn action_kernels_are_reproducible_under_a_fixed_seed() {
    let hands = Deck::shuffled_with_seed(34).deal();
    let mut choices = Vec::new();
    for _ in 0..2 {
        let kernel = ActionKernel::with_seed(tiny_action_options(), 77);
        let (sender, receiver) = mpsc::channel();
        kernel
            .async_rollout(
                &InlineExecutor,
                Contract::Normal,
                Seat::First,
                hands[0].clone(),
                Vec::new(),
                move |result| sender.send(result).expect("test channel open"),
            )
            .expect("kernel idle");
        let stats = receiver
            .recv()
            .expect("completion delivered")
            .expect("computation finishes");
        choices.push(stats.best_action());
    }
    assert_eq!(choices[0], choices[1]);
}

#[test]
fn contract_kernel_declares_and_publishes_the_best_contract() {
    // A strong trump hand with both clubs queens, so the marriage is
    // among the candidates.
    let hand = Hand::with_cards(vec![
        Card::new(Suit::Clubs, Face::Queen),
        Card::new(Suit::Clubs, Face::Queen),
        Card::new(Suit::Spades, Face::Queen),
        Card::new(Suit::Hearts, Face::Queen),
        Card::new(Suit::Clubs, Face::Jack),
        Card::new(Suit::Spades, Face::Jack),
        Card::new(Suit::Diamonds, Face::Ace),
        Card::new(Suit::Diamonds, Face::Ace),
        Card::new(Suit::Diamonds, Face::Ten),
        Card::new(Suit::Clubs, Face::Ace),
        Card::new(Suit::Spades, Face::Ace),
        Card::new(Suit::Hearts, Face::Ace),
    ]);
    let options = ContractKernelOptions {
        n_trees: 1,
        n_rollouts: 30,
        batch_size: 10,
        ..ContractKernelOptions::default()
    };
    let kernel = ContractKernel::with_seed(options, 5);
    assert_eq!(kernel.best_contract(), None);
    let (sender, receiver) = mpsc::channel();
    kernel
        .async_rollout(&InlineExecutor, Seat::First, Seat::Second, hand, move |result| {
            sender.send(result).expect("test channel open")
        })
        .expect("kernel idle");
    let declared = receiver
        .recv()
        .expect("completion delivered")
        .expect("computation finishes");
    assert_eq!(declared.seat, Seat::Second);
    let best = kernel.best_contract().expect("published after completion");
    if best == Contract::Normal {
        assert_eq!(declared.health, doko_core::game::machine::Healthiness::Healthy);
    } else {
        assert_eq!(
            declared.health,
            doko_core::game::machine::Healthiness::Reservation
        );
    }
}
