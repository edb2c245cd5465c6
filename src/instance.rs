//! src/instance.rs
//!
//! Representeert een MAX-SC-QBF instantie: een universum van elementen, een
//! collectie sets die elk een deel van het universum afdekken, en een
//! bovendriehoeksmatrix `A` met coëfficiënten. De doelfunctie is
//! `f(x) = Σ_{i<=j} a_ij · x_i · x_j`; de diagonaal `a_ii` is de lineaire term.
//!
//! Per set wordt een `BitVec` over de posities in het (gesorteerde) universum
//! bijgehouden, zodat dekkingscontroles en -tellingen goedkoop blijven.
//! Ondersteunt het parsen van het gangbare SC-QBF tekstformaat.

use crate::solution::Solution;
use bitvec::prelude::*;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Fouten bij het opbouwen of inlezen van een instantie.
#[derive(Debug, Error)]
pub enum InstanceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("unexpected end of input while reading {what}")]
    UnexpectedEof { what: &'static str },

    #[error("invalid token '{token}' at position {position} ({what}): {reason}")]
    InvalidToken {
        token: String,
        position: usize,
        what: &'static str,
        reason: String,
    },

    #[error("set {set} contains element {element}, which is not part of the universe")]
    UnknownElement { set: usize, element: usize },

    #[error("expected {expected} coefficient rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("coefficient row {row} has {found} entries, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Een read-only MAX-SC-QBF probleeminstantie.
#[derive(Clone, Debug)]
pub struct Instance {
    /// Gesorteerde, unieke element-identifiers.
    universe: Vec<usize>,
    /// `sets[i]` zijn de elementen van set `i`, zoals opgegeven.
    sets: Vec<Vec<usize>>,
    /// `masks[i][p]` is 1 als set `i` het element op universumpositie `p` bevat.
    masks: Vec<BitVec>,
    /// Rij `i` bevat `a_ii, a_i(i+1), ..., a_i(n-1)`.
    coefficients: Vec<Vec<f64>>,
}

impl Instance {
    /*────────── Constructors ──────────*/

    /// Creëert een instantie met alle coëfficiënten op nul.
    pub fn with_sets<U>(universe: U, sets: Vec<Vec<usize>>) -> Result<Self, InstanceError>
    where
        U: IntoIterator<Item = usize>,
    {
        let n = sets.len();
        let coefficients = (0..n).map(|i| vec![0.0; n - i]).collect();
        Self::from_parts(universe, sets, coefficients)
    }

    /// Bouwt een instantie uit een universum, sets en een bovendriehoeksmatrix
    /// waarin rij `i` precies `n - i` waarden heeft.
    pub fn from_parts<U>(
        universe: U,
        sets: Vec<Vec<usize>>,
        coefficients: Vec<Vec<f64>>,
    ) -> Result<Self, InstanceError>
    where
        U: IntoIterator<Item = usize>,
    {
        let mut universe: Vec<usize> = universe.into_iter().collect();
        universe.sort_unstable();
        universe.dedup();

        let n = sets.len();
        if coefficients.len() != n {
            return Err(InstanceError::RowCount {
                expected: n,
                found: coefficients.len(),
            });
        }
        for (row, values) in coefficients.iter().enumerate() {
            if values.len() != n - row {
                return Err(InstanceError::RowLength {
                    row,
                    expected: n - row,
                    found: values.len(),
                });
            }
        }

        let mut masks = Vec::with_capacity(n);
        for (set, elements) in sets.iter().enumerate() {
            let mut mask = bitvec![0; universe.len()];
            for &element in elements {
                match universe.binary_search(&element) {
                    Ok(pos) => mask.set(pos, true),
                    Err(_) => return Err(InstanceError::UnknownElement { set, element }),
                }
            }
            masks.push(mask);
        }

        Ok(Self {
            universe,
            sets,
            masks,
            coefficients,
        })
    }

    /// Parset het SC-QBF tekstformaat:
    ///
    /// ```text
    /// n
    /// |S_1| ... |S_n|
    /// <elementen van S_1>
    /// ...
    /// <elementen van S_n>
    /// a_11 a_12 ... a_1n
    /// a_22 ... a_2n
    /// ...
    /// a_nn
    /// ```
    ///
    /// Het universum is `{1, ..., n}`. Witruimte (ook regeleinden) scheidt tokens.
    pub fn parse<R: Read>(mut reader: R) -> Result<Self, InstanceError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        let mut tokens = Tokens::new(&text);

        let n: usize = tokens.next_value("number of sets")?;

        // Aantallen uit de kop zijn niet te vertrouwen: geen pre-allocatie
        // voordat de bijbehorende tokens echt gelezen zijn.
        let mut sizes = Vec::new();
        for _ in 0..n {
            sizes.push(tokens.next_value::<usize>("set size")?);
        }

        let mut sets = Vec::with_capacity(n);
        for &size in &sizes {
            let mut elements = Vec::new();
            for _ in 0..size {
                elements.push(tokens.next_value::<usize>("set element")?);
            }
            sets.push(elements);
        }

        let mut coefficients = Vec::with_capacity(n);
        for i in 0..n {
            let mut row = Vec::with_capacity(n - i);
            for _ in i..n {
                row.push(tokens.next_value::<f64>("coefficient")?);
            }
            coefficients.push(row);
        }

        Self::from_parts(1..=n, sets, coefficients)
    }

    /// Leest een instantie van schijf.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, InstanceError> {
        let file = File::open(path)?;
        Self::parse(BufReader::new(file))
    }

    /*────────── Getters ──────────*/

    /// Geeft het aantal sets `n` terug.
    #[inline]
    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    /// Het universum als gesorteerde slice van element-identifiers.
    #[inline]
    pub fn universe(&self) -> &[usize] {
        &self.universe
    }

    #[inline]
    pub fn universe_size(&self) -> usize {
        self.universe.len()
    }

    /// De elementen van set `i`.
    #[inline]
    pub fn elements_of(&self, i: usize) -> &[usize] {
        &self.sets[i]
    }

    /// Dekkingsmasker van set `i` over de universumposities.
    #[inline]
    pub fn coverage_mask(&self, i: usize) -> &BitSlice {
        &self.masks[i]
    }

    /// De lineaire coëfficiënt `a_ii` van set `i`.
    #[inline]
    pub fn linear_coefficient(&self, i: usize) -> f64 {
        self.coefficients[i][0]
    }

    /// De coëfficiënt `a_ij`; vereist `i <= j`.
    #[inline]
    pub fn quadratic_coefficient(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i <= j, "quadratic_coefficient vereist i <= j");
        self.coefficients[i][j - i]
    }

    /// Waarde van de doelfunctie voor `sol`. De lege oplossing heeft waarde 0.
    pub fn evaluate(&self, sol: &Solution) -> f64 {
        let selected = sol.to_indices();
        let mut value = 0.0;
        for (k, &i) in selected.iter().enumerate() {
            let row = &self.coefficients[i];
            for &j in &selected[k..] {
                value += row[j - i];
            }
        }
        value
    }

    /// Controleert of elk element van het universum door minstens één
    /// geselecteerde set wordt gedekt. Oplossingen van de verkeerde lengte
    /// zijn nooit haalbaar.
    pub fn is_feasible(&self, sol: &Solution) -> bool {
        if sol.len() != self.num_sets() {
            return false;
        }
        let mut covered = bitvec![0; self.universe.len()];
        for i in sol.selected() {
            for pos in self.masks[i].iter_ones() {
                covered.set(pos, true);
            }
        }
        covered.all()
    }

    /*────────── Mutators ──────────*/

    /// Zet de lineaire coëfficiënt van set `i`.
    pub fn set_linear(&mut self, i: usize, value: f64) {
        self.coefficients[i][0] = value;
    }

    /// Zet de interactiecoëfficiënt tussen sets `i` en `j` (volgorde vrij).
    pub fn set_quadratic(&mut self, i: usize, j: usize, value: f64) {
        assert!(
            i != j && i < self.num_sets() && j < self.num_sets(),
            "Setindex buiten bereik of diagonaal"
        );
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        self.coefficients[lo][hi - lo] = value;
    }
}

/// Tokenstroom over witruimte-gescheiden invoer, met positie voor foutmeldingen.
struct Tokens<'a> {
    inner: std::iter::Enumerate<std::str::SplitWhitespace<'a>>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace().enumerate(),
        }
    }

    fn next_value<T>(&mut self, what: &'static str) -> Result<T, InstanceError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let (position, token) = self
            .inner
            .next()
            .ok_or(InstanceError::UnexpectedEof { what })?;
        token.parse().map_err(|e: T::Err| InstanceError::InvalidToken {
            token: token.to_string(),
            position,
            what,
            reason: e.to_string(),
        })
    }
}
