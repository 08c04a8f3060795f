use crate::nfa::{AutomatonStats, Nfa, StateId};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::fmt;

/// A deterministic finite automaton produced by the subset construction.
///
/// Each state corresponds to a set of NFA states; the subset is kept for
/// diagnostics and DOT labels but plays no part in matching. Transitions
/// are a per-state sorted map from symbol to target; a missing entry
/// rejects, so the ⊥ sink stays implicit. There are no ε-transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    transitions: Vec<BTreeMap<char, StateId>>,
    subsets: Vec<Vec<StateId>>,
    start: StateId,
    accepting: BTreeSet<StateId>,
    alphabet: BTreeSet<char>,
}

impl Dfa {
    fn new(alphabet: BTreeSet<char>) -> Self {
        Self {
            transitions: Vec::new(),
            subsets: Vec::new(),
            start: 0,
            accepting: BTreeSet::new(),
            alphabet,
        }
    }

    fn add_state(&mut self, subset: Vec<StateId>, accepting: bool) -> StateId {
        let id = self.transitions.len();
        self.transitions.push(BTreeMap::new());
        self.subsets.push(subset);
        if accepting {
            self.accepting.insert(id);
        }
        id
    }

    fn add_transition(&mut self, from: StateId, symbol: char, to: StateId) {
        if let Some(row) = self.transitions.get_mut(from) {
            row.insert(symbol, to);
        }
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn accepting(&self) -> &BTreeSet<StateId> {
        &self.accepting
    }

    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    pub fn state_count(&self) -> usize {
        self.transitions.len()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.iter().map(BTreeMap::len).sum()
    }

    /// The target of the transition from `state` on `symbol`, if any.
    pub fn transition(&self, state: StateId, symbol: char) -> Option<StateId> {
        self.transitions
            .get(state)
            .and_then(|row| row.get(&symbol).copied())
    }

    /// All transitions as `(from, symbol, to)` triples, ascending by
    /// source state and symbol.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, char, StateId)> + '_ {
        self.transitions.iter().enumerate().flat_map(|(from, row)| {
            row.iter().map(move |(&symbol, &to)| (from, symbol, to))
        })
    }

    /// The NFA states this DFA state was built from, ascending.
    pub fn subset(&self, state: StateId) -> &[StateId] {
        self.subsets.get(state).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Decides whether `input` is in the language of the automaton.
    ///
    /// A missing transition, including any character outside the
    /// alphabet, rejects immediately.
    pub fn simulate(&self, input: &str) -> bool {
        let mut current = self.start;

        for symbol in input.chars() {
            match self.transition(current, symbol) {
                Some(next) => current = next,
                None => return false,
            }
        }

        self.accepting.contains(&current)
    }

    pub fn stats(&self) -> AutomatonStats {
        AutomatonStats {
            states: self.state_count(),
            transitions: self.transition_count(),
            epsilon_transitions: 0,
            alphabet_size: self.alphabet.len(),
            accepting_states: self.accepting.len(),
        }
    }

    /// Renders the automaton in Graphviz DOT format. Nodes are labeled
    /// with the NFA subset they represent.
    pub fn to_dot(&self) -> String {
        let mut lines = vec!["digraph dfa {".to_string(), "  rankdir=LR;".to_string()];

        for state in 0..self.state_count() {
            let shape = if self.accepting.contains(&state) {
                "doublecircle"
            } else {
                "circle"
            };
            lines.push(format!(
                "  {} [shape={}, label=\"q{}\\n{{{}}}\"];",
                state,
                shape,
                state,
                format_subset(self.subset(state))
            ));
        }

        lines.push("  start [shape=point];".to_string());
        lines.push(format!("  start -> {};", self.start));

        for (from, symbol, to) in self.transitions() {
            lines.push(format!("  {} -> {} [label=\"{}\"];", from, to, symbol));
        }

        lines.push("}".to_string());
        lines.join("\n")
    }
}

fn format_subset(subset: &[StateId]) -> String {
    let ids: Vec<String> = subset.iter().map(|id| id.to_string()).collect();
    ids.join(",")
}

impl fmt::Display for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DFA with {} states", self.state_count())?;

        let alphabet: Vec<String> = self.alphabet.iter().map(|c| c.to_string()).collect();
        writeln!(f, "alphabet: {{{}}}", alphabet.join(", "))?;
        writeln!(f, "start: q{}", self.start)?;

        writeln!(f, "states:")?;
        for state in 0..self.state_count() {
            let marker = if self.accepting.contains(&state) {
                " (accepting)"
            } else {
                ""
            };
            writeln!(
                f,
                "  q{} {{{}}}{}",
                state,
                format_subset(self.subset(state)),
                marker
            )?;
        }

        writeln!(f, "transitions:")?;
        for (from, symbol, to) in self.transitions() {
            writeln!(f, "  q{} --{}--> q{}", from, symbol, to)?;
        }

        Ok(())
    }
}

/// Determinizes an NFA with the powerset construction.
///
/// DFA states are keyed by the canonical form of their NFA subset, the
/// ascending state id sequence. The worklist is processed in insertion
/// order and the alphabet in ascending character order, so determinizing
/// the same NFA twice produces identical automata.
pub struct SubsetConstructor<'a> {
    nfa: &'a Nfa,
    state_map: HashMap<Vec<StateId>, StateId>,
    dfa: Dfa,
}

impl<'a> SubsetConstructor<'a> {
    pub fn new(nfa: &'a Nfa) -> Self {
        Self {
            nfa,
            state_map: HashMap::new(),
            dfa: Dfa::new(nfa.alphabet().clone()),
        }
    }

    pub fn construct(mut self) -> Dfa {
        let nfa = self.nfa;

        let mut start_set = BTreeSet::new();
        start_set.insert(nfa.start());
        let start_closure = nfa.epsilon_closure(&start_set);

        let (start_id, _) = self.intern(&start_closure);
        self.dfa.start = start_id;

        let mut work_list = VecDeque::new();
        work_list.push_back((start_closure, start_id));

        while let Some((subset, from)) = work_list.pop_front() {
            for &symbol in nfa.alphabet() {
                let target = nfa.epsilon_closure(&nfa.move_set(&subset, symbol));
                if target.is_empty() {
                    // No transition: the implicit sink rejects.
                    continue;
                }

                let (to, created) = self.intern(&target);
                if created {
                    work_list.push_back((target, to));
                }
                self.dfa.add_transition(from, symbol, to);
            }
        }

        self.dfa
    }

    /// Looks up or creates the DFA state for an NFA subset; the second
    /// component reports whether the state is new.
    fn intern(&mut self, subset: &BTreeSet<StateId>) -> (StateId, bool) {
        let key: Vec<StateId> = subset.iter().copied().collect();
        if let Some(&existing) = self.state_map.get(&key) {
            return (existing, false);
        }

        let accepting = self.nfa.is_accepting_set(subset);
        let id = self.dfa.add_state(key.clone(), accepting);
        self.state_map.insert(key, id);
        (id, true)
    }
}

/// Determinizes `nfa`, preserving its language.
pub fn to_dfa(nfa: &Nfa) -> Dfa {
    SubsetConstructor::new(nfa).construct()
}
