// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Steiner Weight Trait
//!
//! Unified numeric bounds for edge weights and objective values.
//! `SteinerWeight` gathers the floating point capabilities the graph,
//! shortest-path engine and heuristics rely on into a single alias.
//!
//! ## Motivation
//!
//! Edge weights are real-valued and the heuristics need a value that
//! compares greater than every real path cost (`infinity`) to penalize
//! edges on working graphs. Collecting the bounds here keeps generic
//! signatures short and consistent across crates.
//!
//! ## Highlights
//!
//! - Requires `Float + FromPrimitive` for arithmetic, `infinity` and conversions.
//! - `Debug + Display` for logging and reports.
//! - `Send + Sync + 'static` so weights can live in shared problem data.

use num_traits::{Float, FromPrimitive};

/// A trait alias for numeric types that can be used as edge weights.
/// In practice these are `f32` and `f64`.
pub trait SteinerWeight:
    Float + FromPrimitive + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static
{
}

impl<T> SteinerWeight for T where
    T: Float + FromPrimitive + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static
{
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepts_weight<W: SteinerWeight>(w: W) -> W {
        w + W::one()
    }

    #[test]
    fn test_float_types_are_weights() {
        assert_eq!(accepts_weight(1.0f32), 2.0f32);
        assert_eq!(accepts_weight(1.5f64), 2.5f64);
        assert!(<f64 as Float>::infinity() > f64::MAX);
    }
}
