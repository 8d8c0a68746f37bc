//! Toroidal SIRS lattice with asynchronous single-cell updates.
//!
//! Each cell is Susceptible, Infected or Recovered. Time advances one randomly
//! chosen cell at a time:
//!
//! - S → I with probability `prob_si`, only when a von Neumann neighbour is infected
//! - I → R with probability `prob_ir`
//! - R → S with probability `prob_rs`
//!
//! The grid has periodic boundaries in both directions, so every cell has
//! exactly four neighbours and no lookup special-cases the edge.

use serde::{Deserialize, Serialize};

use crate::engine::rng::RandomSource;
use crate::error::{SirsError, SirsResult};

/// Offsets of the four von Neumann neighbours (N, E, S, W).
const VON_NEUMANN: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// State of a single lattice cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CellState {
    /// Can be infected by an infected neighbour.
    Susceptible,
    /// Infectious.
    Infected,
    /// Temporarily immune.
    Recovered,
}

impl CellState {
    /// All states, in symbol order.
    pub const ALL: [Self; 3] = [Self::Susceptible, Self::Infected, Self::Recovered];

    /// Integer symbol used in lattice snapshots.
    #[must_use]
    pub const fn symbol(self) -> u8 {
        match self {
            Self::Susceptible => 0,
            Self::Infected => 1,
            Self::Recovered => 2,
        }
    }

    /// Inverse of [`CellState::symbol`].
    #[must_use]
    pub const fn from_symbol(symbol: u8) -> Option<Self> {
        match symbol {
            0 => Some(Self::Susceptible),
            1 => Some(Self::Infected),
            2 => Some(Self::Recovered),
            _ => None,
        }
    }
}

/// The three per-lattice transition probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionProbabilities {
    /// Susceptible → Infected, given an infected neighbour.
    pub prob_si: f64,
    /// Infected → Recovered.
    pub prob_ir: f64,
    /// Recovered → Susceptible.
    pub prob_rs: f64,
}

impl TransitionProbabilities {
    /// Create a validated set of probabilities.
    ///
    /// # Errors
    ///
    /// Returns [`SirsError::InvalidProbability`] if any value is outside `[0, 1]`.
    pub fn new(prob_si: f64, prob_ir: f64, prob_rs: f64) -> SirsResult<Self> {
        let probabilities = Self {
            prob_si,
            prob_ir,
            prob_rs,
        };
        probabilities.validate()?;
        Ok(probabilities)
    }

    /// Check every probability lies in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns the first offending probability.
    pub fn validate(&self) -> SirsResult<()> {
        check_probability("prob_si", self.prob_si)?;
        check_probability("prob_ir", self.prob_ir)?;
        check_probability("prob_rs", self.prob_rs)
    }
}

fn check_probability(name: &'static str, value: f64) -> SirsResult<()> {
    // NaN fails the range test too.
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SirsError::InvalidProbability { name, value })
    }
}

/// Resolve a signed coordinate onto `[0, extent)` with true modulo.
#[inline]
fn wrap(index: isize, extent: usize) -> usize {
    index.rem_euclid(extent as isize) as usize
}

/// Fixed-size toroidal lattice of SIRS cells.
///
/// Cells live in one row-major buffer; the lattice is never resized after
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SirsLattice {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
    probabilities: TransitionProbabilities,
}

impl SirsLattice {
    /// Create a lattice with every cell set to `initial`.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or a probability is
    /// outside `[0, 1]`.
    pub fn new(
        rows: usize,
        cols: usize,
        probabilities: TransitionProbabilities,
        initial: CellState,
    ) -> SirsResult<Self> {
        let size = Self::check_dimensions(rows, cols)?;
        probabilities.validate()?;
        Ok(Self {
            rows,
            cols,
            cells: vec![initial; size],
            probabilities,
        })
    }

    /// Create a lattice with every cell drawn uniformly from the three states.
    ///
    /// Cells are drawn in row-major order, one index draw per cell.
    ///
    /// # Errors
    ///
    /// Same as [`SirsLattice::new`].
    pub fn random<R: RandomSource + ?Sized>(
        rows: usize,
        cols: usize,
        probabilities: TransitionProbabilities,
        rng: &mut R,
    ) -> SirsResult<Self> {
        let mut lattice = Self::new(rows, cols, probabilities, CellState::Susceptible)?;
        lattice.randomize(rng);
        Ok(lattice)
    }

    fn check_dimensions(rows: usize, cols: usize) -> SirsResult<usize> {
        match rows.checked_mul(cols) {
            Some(size) if size > 0 => Ok(size),
            _ => Err(SirsError::InvalidDimensions { rows, cols }),
        }
    }

    /// Overwrite every cell with an independent uniform draw over the states.
    pub fn randomize<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        for cell in &mut self.cells {
            *cell = CellState::ALL[rng.next_index(CellState::ALL.len())];
        }
    }

    /// Resolve `(row, col)` onto the lattice before any offset arithmetic.
    #[inline]
    fn resolve(&self, row: isize, col: isize) -> (isize, isize) {
        (wrap(row, self.rows) as isize, wrap(col, self.cols) as isize)
    }

    #[inline]
    fn offset(&self, row: isize, col: isize) -> usize {
        wrap(col, self.cols) + wrap(row, self.rows) * self.cols
    }

    /// State at `(row, col)`, wrapping toroidally.
    #[must_use]
    #[inline]
    pub fn at(&self, row: isize, col: isize) -> CellState {
        self.cells[self.offset(row, col)]
    }

    /// Set the state at `(row, col)`, wrapping toroidally.
    #[inline]
    pub fn set(&mut self, row: isize, col: isize, state: CellState) {
        let offset = self.offset(row, col);
        self.cells[offset] = state;
    }

    /// True iff any of the four von Neumann neighbours is infected.
    #[must_use]
    pub fn has_infected_neighbour(&self, row: isize, col: isize) -> bool {
        let (row, col) = self.resolve(row, col);
        VON_NEUMANN
            .iter()
            .any(|&(dr, dc)| self.at(row + dr, col + dc) == CellState::Infected)
    }

    /// Apply the stochastic transition rule once to `(row, col)`.
    ///
    /// A susceptible cell without an infected neighbour consumes no draw; every
    /// other branch consumes exactly one unit draw compared with strict `<`.
    /// Returns the (possibly unchanged) new state.
    pub fn update_cell<R: RandomSource + ?Sized>(
        &mut self,
        row: isize,
        col: isize,
        rng: &mut R,
    ) -> CellState {
        let (row, col) = self.resolve(row, col);
        let offset = self.offset(row, col);
        let p = self.probabilities;

        let next = match self.cells[offset] {
            CellState::Susceptible => {
                if self.has_infected_neighbour(row, col) && rng.next_unit() < p.prob_si {
                    CellState::Infected
                } else {
                    CellState::Susceptible
                }
            }
            CellState::Infected => {
                if rng.next_unit() < p.prob_ir {
                    CellState::Recovered
                } else {
                    CellState::Infected
                }
            }
            CellState::Recovered => {
                if rng.next_unit() < p.prob_rs {
                    CellState::Susceptible
                } else {
                    CellState::Recovered
                }
            }
        };

        self.cells[offset] = next;
        next
    }

    /// Update one uniformly chosen cell: row draw, then column draw.
    pub fn update<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> CellState {
        let row = rng.next_index(self.rows);
        let col = rng.next_index(self.cols);
        self.update_cell(row as isize, col as isize, rng)
    }

    /// Number of cells currently in `state`.
    #[must_use]
    pub fn count_in_state(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }

    /// Fraction of cells currently in `state`, in `[0, 1]`.
    #[must_use]
    pub fn fraction_in_state(&self, state: CellState) -> f64 {
        self.count_in_state(state) as f64 / self.size() as f64
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.rows * self.cols
    }

    /// Row-major view of all cells.
    #[must_use]
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Row-major integer symbols, one per cell.
    #[must_use]
    pub fn symbols(&self) -> Vec<u8> {
        self.cells.iter().map(|cell| cell.symbol()).collect()
    }

    /// Current transition probabilities.
    #[must_use]
    pub const fn probabilities(&self) -> TransitionProbabilities {
        self.probabilities
    }

    /// Probability of S → I on contact.
    #[must_use]
    pub const fn prob_si(&self) -> f64 {
        self.probabilities.prob_si
    }

    /// Probability of I → R.
    #[must_use]
    pub const fn prob_ir(&self) -> f64 {
        self.probabilities.prob_ir
    }

    /// Probability of R → S.
    #[must_use]
    pub const fn prob_rs(&self) -> f64 {
        self.probabilities.prob_rs
    }

    /// Set the S → I probability; applies from the next update.
    ///
    /// # Errors
    ///
    /// Returns an error if `prob` is outside `[0, 1]`.
    pub fn set_prob_si(&mut self, prob: f64) -> SirsResult<()> {
        check_probability("prob_si", prob)?;
        self.probabilities.prob_si = prob;
        Ok(())
    }

    /// Set the I → R probability; applies from the next update.
    ///
    /// # Errors
    ///
    /// Returns an error if `prob` is outside `[0, 1]`.
    pub fn set_prob_ir(&mut self, prob: f64) -> SirsResult<()> {
        check_probability("prob_ir", prob)?;
        self.probabilities.prob_ir = prob;
        Ok(())
    }

    /// Set the R → S probability; applies from the next update.
    ///
    /// # Errors
    ///
    /// Returns an error if `prob` is outside `[0, 1]`.
    pub fn set_prob_rs(&mut self, prob: f64) -> SirsResult<()> {
        check_probability("prob_rs", prob)?;
        self.probabilities.prob_rs = prob;
        Ok(())
    }
}
