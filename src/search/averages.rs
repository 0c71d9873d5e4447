//! Moving averages of the glue of learned clauses.

/// Exponential moving average with bias correction of the initial zero value.
#[derive(Debug, Clone)]
pub(crate) struct Ema {
    value: f64,
    biased: f64,
    alpha: f64,
    beta: f64,
    /// `beta^n` after `n` updates, zero once it underflows
    exp: f64,
}

impl Ema {
    pub(crate) fn new(window: u32) -> Self {
        assert!(window > 0);
        let alpha = 1.0 / f64::from(window);
        Self { value: 0.0, biased: 0.0, alpha, beta: 1.0 - alpha, exp: 1.0 }
    }

    pub(crate) fn update(&mut self, y: f64) {
        self.biased += self.alpha * (y - self.biased);
        if self.exp > 0.0 {
            self.exp *= self.beta;
            self.value = self.biased / (1.0 - self.exp);
        } else {
            self.value = self.biased;
        }
    }

    pub(crate) fn value(&self) -> f64 {
        self.value
    }
}

/// The fast and slow glue averages driving focused mode restarts.
#[derive(Debug, Clone)]
pub struct GlueAverages {
    fast: Ema,
    slow: Ema,
}

impl GlueAverages {
    pub(crate) fn new(fast: u32, slow: u32) -> Self {
        Self { fast: Ema::new(fast), slow: Ema::new(slow) }
    }

    pub(crate) fn update(&mut self, glue: u32) {
        let glue = f64::from(glue);
        self.fast.update(glue);
        self.slow.update(glue);
    }

    pub fn fast(&self) -> f64 {
        self.fast.value()
    }

    pub fn slow(&self) -> f64 {
        self.slow.value()
    }
}

#[cfg(test)]
impl GlueAverages {
    /// Averages pinned to the given values, updates do not change them.
    pub(crate) fn fixed(fast: f64, slow: f64) -> Self {
        let fixed = |value: f64| Ema { value, biased: value, alpha: 0.0, beta: 1.0, exp: 0.0 };
        Self { fast: fixed(fast), slow: fixed(slow) }
    }
}
