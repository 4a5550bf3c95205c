//! Mortality basis: an age-indexed table of annual death probabilities
//!
//! A basis covers a contiguous age range `[min_age, max_age]`. Lookups outside
//! that range are errors rather than being clamped to the nearest age, so a
//! cohort that runs off the end of a table is rejected up front.

use crate::error::ProjectionError;

/// Identifier of the built-in English Life Table No. 17 (males)
pub const ELT17_MALES: &str = "ELT17_MALES";

/// Annual mortality table over a contiguous age range
#[derive(Debug, Clone, PartialEq)]
pub struct MortalityBasis {
    id: String,

    /// Age of the first entry in `annual_rates`
    min_age: u32,

    /// Annual qx by age, index = age - min_age
    annual_rates: Vec<f64>,
}

impl MortalityBasis {
    /// Create a basis from rates starting at `min_age`
    pub fn new(
        id: impl Into<String>,
        min_age: u32,
        annual_rates: Vec<f64>,
    ) -> Result<Self, ProjectionError> {
        let id = id.into();

        if annual_rates.is_empty() {
            return Err(ProjectionError::InvalidBasis {
                basis_id: id,
                reason: "table has no rates".to_string(),
            });
        }

        if let Some((offset, qx)) = annual_rates
            .iter()
            .enumerate()
            .find(|(_, qx)| !qx.is_finite() || **qx < 0.0 || **qx > 1.0)
        {
            return Err(ProjectionError::InvalidBasis {
                basis_id: id,
                reason: format!(
                    "qx {} at age {} is not a probability",
                    qx,
                    min_age as usize + offset
                ),
            });
        }

        Ok(Self {
            id,
            min_age,
            annual_rates,
        })
    }

    /// Create a basis from (age, qx) pairs in any order
    ///
    /// The ages must form a contiguous range with no duplicates.
    pub fn from_pairs(
        id: impl Into<String>,
        mut pairs: Vec<(u32, f64)>,
    ) -> Result<Self, ProjectionError> {
        let id = id.into();
        pairs.sort_by_key(|(age, _)| *age);

        let min_age = match pairs.first() {
            Some((age, _)) => *age,
            None => {
                return Err(ProjectionError::InvalidBasis {
                    basis_id: id,
                    reason: "table has no rates".to_string(),
                })
            }
        };

        for (offset, (age, _)) in pairs.iter().enumerate() {
            let expected = min_age + offset as u32;
            if *age != expected {
                return Err(ProjectionError::InvalidBasis {
                    basis_id: id,
                    reason: format!("ages are not contiguous: expected {}, found {}", expected, age),
                });
            }
        }

        let rates = pairs.into_iter().map(|(_, qx)| qx).collect();
        Self::new(id, min_age, rates)
    }

    /// English Life Table No. 17, males (ONS, 2010-2012 data), ages 0-100
    ///
    /// Age 100 carries qx = 1 so nobody survives past the end of the table.
    pub fn elt17_males() -> Self {
        Self {
            id: ELT17_MALES.to_string(),
            min_age: 0,
            annual_rates: Self::elt17_males_rates(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn min_age(&self) -> u32 {
        self.min_age
    }

    pub fn max_age(&self) -> u32 {
        self.min_age + self.annual_rates.len() as u32 - 1
    }

    /// Whether `age` has a table entry
    pub fn contains(&self, age: u32) -> bool {
        age >= self.min_age && age <= self.max_age()
    }

    /// Annual probability of death for an integer age
    pub fn annual_rate(&self, age: u32) -> Result<f64, ProjectionError> {
        if !self.contains(age) {
            return Err(ProjectionError::OutOfRange {
                basis_id: self.id.clone(),
                age,
                min_age: self.min_age,
                max_age: self.max_age(),
            });
        }
        Ok(self.annual_rates[(age - self.min_age) as usize])
    }

    /// Monthly probability of death: q_monthly = 1 - (1 - q_annual)^(1/12)
    ///
    /// Exact for a constant force of mortality within the year of age.
    pub fn monthly_rate(&self, age: u32) -> Result<f64, ProjectionError> {
        let annual = self.annual_rate(age)?;
        Ok(annual_to_monthly(annual))
    }

    /// (age, qx) pairs in age order
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.annual_rates
            .iter()
            .enumerate()
            .map(move |(offset, qx)| (self.min_age + offset as u32, *qx))
    }

    fn elt17_males_rates() -> Vec<f64> {
        vec![
            // Age 0-9
            0.004707, 0.000337, 0.000186, 0.000150, 0.000121,
            0.000107, 0.000096, 0.000088, 0.000083, 0.000083,
            // Age 10-19
            0.000089, 0.000100, 0.000117, 0.000140, 0.000169,
            0.000206, 0.000260, 0.000334, 0.000418, 0.000495,
            // Age 20-29
            0.000553, 0.000588, 0.000604, 0.000607, 0.000605,
            0.000601, 0.000598, 0.000600, 0.000607, 0.000622,
            // Age 30-39
            0.000646, 0.000680, 0.000724, 0.000780, 0.000848,
            0.000928, 0.001021, 0.001128, 0.001249, 0.001386,
            // Age 40-49
            0.001538, 0.001707, 0.001893, 0.002099, 0.002326,
            0.002575, 0.002849, 0.003149, 0.003479, 0.003842,
            // Age 50-59
            0.004242, 0.004683, 0.005171, 0.005712, 0.006315,
            0.006988, 0.007742, 0.008589, 0.009541, 0.010615,
            // Age 60-69
            0.011826, 0.013195, 0.014743, 0.016496, 0.018485,
            0.020745, 0.023318, 0.026251, 0.029601, 0.033429,
            // Age 70-79
            0.037809, 0.042827, 0.048582, 0.055188, 0.062773,
            0.071487, 0.081499, 0.093002, 0.106217, 0.121392,
            // Age 80-89
            0.138802, 0.158745, 0.181534, 0.207489, 0.236922,
            0.270111, 0.307256, 0.348429, 0.393512, 0.442143,
            // Age 90-99
            0.493651, 0.547108, 0.601335, 0.654943, 0.706489,
            0.754621, 0.798189, 0.836310, 0.868438, 0.894366,
            // Age 100
            1.000000,
        ]
    }
}

/// Compound de-annualisation of a death probability
pub fn annual_to_monthly(q_annual: f64) -> f64 {
    1.0 - (1.0 - q_annual).powf(1.0 / 12.0)
}
