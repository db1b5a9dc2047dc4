//! Tabular Q-learning agent.
//!
//! State is the previous round's move pair (or the opening), action is the
//! next move, reward is the change in our cumulative score since the last
//! decision.

use rand::{Rng, RngCore};

use crate::strategy::{Move, Strategy, Turn};

/// Opening plus the four (own, opponent) move pairs.
const STATES: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Start,
    Last(Move, Move),
}

impl State {
    fn of(turn: &Turn<'_>) -> Self {
        match turn.last() {
            None => State::Start,
            Some((mine, theirs)) => State::Last(mine, theirs),
        }
    }

    fn index(self) -> usize {
        match self {
            State::Start => 0,
            State::Last(Move::Cooperate, Move::Cooperate) => 1,
            State::Last(Move::Cooperate, Move::Defect) => 2,
            State::Last(Move::Defect, Move::Cooperate) => 3,
            State::Last(Move::Defect, Move::Defect) => 4,
        }
    }
}

fn action_index(m: Move) -> usize {
    match m {
        Move::Cooperate => 0,
        Move::Defect => 1,
    }
}

/// Epsilon-greedy Q-learner.
#[derive(Clone, Debug)]
pub struct QLearningAgent {
    /// Learning rate
    alpha: f64,
    /// Discount factor
    gamma: f64,
    /// Exploration rate
    epsilon: f64,
    q: [[f64; 2]; STATES],
    last: Option<(State, Move)>,
    last_score: u64,
}

impl QLearningAgent {
    pub const NAME: &'static str = "QLearningAgent";

    /// `epsilon` is clamped to [0, 1].
    pub fn new(alpha: f64, gamma: f64, epsilon: f64) -> Self {
        Self {
            alpha,
            gamma,
            epsilon: if epsilon.is_nan() { 0.0 } else { epsilon.clamp(0.0, 1.0) },
            q: [[0.0; 2]; STATES],
            last: None,
            last_score: 0,
        }
    }

    /// Learned value of playing `action` after `previous` (None = opening).
    pub fn value(&self, previous: Option<(Move, Move)>, action: Move) -> f64 {
        let state = match previous {
            None => State::Start,
            Some((mine, theirs)) => State::Last(mine, theirs),
        };
        self.q[state.index()][action_index(action)]
    }

    fn learn(&mut self, state: State, action: Move, reward: f64, next: State) {
        let best_next = self.q[next.index()].iter().copied().fold(f64::MIN, f64::max);
        let q = &mut self.q[state.index()][action_index(action)];
        *q += self.alpha * (reward + self.gamma * best_next - *q);
    }

    fn choose(&self, state: State, rng: &mut dyn RngCore) -> Move {
        if rng.random_bool(self.epsilon) {
            return random_move(rng);
        }
        let [coop, defect] = self.q[state.index()];
        if coop > defect {
            Move::Cooperate
        } else if defect > coop {
            Move::Defect
        } else {
            random_move(rng)
        }
    }
}

impl Default for QLearningAgent {
    fn default() -> Self {
        Self::new(0.1, 0.9, 0.1)
    }
}

fn random_move(rng: &mut dyn RngCore) -> Move {
    if rng.random_bool(0.5) {
        Move::Cooperate
    } else {
        Move::Defect
    }
}

impl Strategy for QLearningAgent {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn decide(&mut self, turn: &Turn<'_>, rng: &mut dyn RngCore) -> Move {
        let state = State::of(turn);

        if let Some((prev_state, prev_action)) = self.last {
            let reward = turn.score.saturating_sub(self.last_score) as f64;
            self.learn(prev_state, prev_action, reward, state);
        }

        let action = self.choose(state, rng);
        self.last = Some((state, action));
        self.last_score = turn.score;
        action
    }

    /// Forget the episode, keep the table.
    fn reset(&mut self) {
        self.last = None;
        self.last_score = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payoff::PayoffMatrix;
    use crate::random::SeededRng;
    use Move::{Cooperate as C, Defect as D};

    const PAYOFF: PayoffMatrix = PayoffMatrix::standard();

    fn turn<'a>(own: &'a [Move], opponent: &'a [Move], score: u64) -> Turn<'a> {
        Turn {
            round: own.len() as u32 + 1,
            own,
            opponent,
            score,
            payoff: &PAYOFF,
        }
    }

    #[test]
    fn test_first_decision_learns_nothing() {
        let mut agent = QLearningAgent::default();
        let mut rng = SeededRng::new(1);
        agent.decide(&turn(&[], &[], 0), &mut rng);
        for action in [C, D] {
            assert_eq!(agent.value(None, action), 0.0);
        }
    }

    #[test]
    fn test_reward_updates_previous_state() {
        // No exploration so the chosen action is the tie-break only
        let mut agent = QLearningAgent::new(0.5, 0.0, 0.0);
        let mut rng = SeededRng::new(3);

        let first = agent.decide(&turn(&[], &[], 0), &mut rng);
        // Previous round paid 3
        agent.decide(&turn(&[first], &[C], 3), &mut rng);

        // q = 0 + 0.5 * (3 + 0 - 0)
        assert_eq!(agent.value(None, first), 1.5);
        assert_eq!(agent.value(None, first.flip()), 0.0);
    }

    #[test]
    fn test_greedy_follows_table() {
        let mut agent = QLearningAgent::new(0.1, 0.9, 0.0);
        agent.q[State::Last(C, C).index()] = [2.0, 1.0];
        agent.q[State::Last(C, D).index()] = [0.0, 4.0];
        let mut rng = SeededRng::new(5);

        assert_eq!(agent.decide(&turn(&[C], &[C], 3), &mut rng), C);
        agent.reset();
        assert_eq!(agent.decide(&turn(&[C], &[D], 0), &mut rng), D);
    }

    #[test]
    fn test_reset_keeps_table() {
        let mut agent = QLearningAgent::new(1.0, 0.0, 0.0);
        let mut rng = SeededRng::new(8);
        let a = agent.decide(&turn(&[], &[], 0), &mut rng);
        agent.decide(&turn(&[a], &[C], 5), &mut rng);
        let learned = agent.value(None, a);
        assert_eq!(learned, 5.0);

        agent.reset();
        assert_eq!(agent.value(None, a), learned);
        assert!(agent.last.is_none());
        assert_eq!(agent.last_score, 0);
    }

    #[test]
    fn test_state_indices_are_distinct() {
        let mut seen = [false; STATES];
        let states = [
            State::Start,
            State::Last(C, C),
            State::Last(C, D),
            State::Last(D, C),
            State::Last(D, D),
        ];
        for s in states {
            assert!(!seen[s.index()]);
            seen[s.index()] = true;
        }
    }
}
