//! Integer delta function

use crate::traits::{Function, Function2};

/// 1 at `(xo, yo)`, 0 everywhere else; no parameters
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerDeltaFunction2 {
    xo: f64,
    yo: f64,
    params: Vec<f64>,
}

impl IntegerDeltaFunction2 {
    pub fn new(xo: f64, yo: f64) -> Self {
        Self {
            xo,
            yo,
            params: Vec::new(),
        }
    }

    pub fn position(&self) -> (f64, f64) {
        (self.xo, self.yo)
    }
}

impl Function for IntegerDeltaFunction2 {
    fn name(&self) -> &'static str {
        "IntegerDeltaFunction2"
    }

    fn parameters(&self) -> &[f64] {
        &self.params
    }

    fn parameters_mut(&mut self) -> &mut [f64] {
        &mut self.params
    }
}

impl Function2 for IntegerDeltaFunction2 {
    fn eval_with(&self, _params: &[f64], x: f64, y: f64) -> f64 {
        if x == self.xo && y == self.yo {
            1.0
        } else {
            0.0
        }
    }

    fn clone_box(&self) -> Box<dyn Function2> {
        Box::new(self.clone())
    }
}
