//! Body mass index calculation and classification.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// BMI band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Classifies a BMI value. Bands are half-open: `[18.5, 24.9)` is normal.
    pub fn classify(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 24.9 {
            BmiCategory::Normal
        } else if bmi < 29.9 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn suggestion(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => {
                "You should consider a balanced diet with more proteins and healthy fats. Consult a nutritionist."
            }
            BmiCategory::Normal => {
                "Great job! Maintain your current lifestyle with a balanced diet and regular exercise."
            }
            BmiCategory::Overweight => {
                "Try incorporating more physical activity and a healthy diet into your routine. Small changes can make a big difference!"
            }
            BmiCategory::Obese => {
                "Consider a structured weight loss plan with professional guidance. A combination of exercise and diet will help!"
            }
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        };
        write!(f, "{}", s)
    }
}

/// A computed BMI with its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiReading {
    pub weight_kg: f64,
    pub height_cm: f64,
    /// Rounded to one decimal; the category is taken from this value.
    pub bmi: f64,
    pub category: BmiCategory,
}

impl BmiReading {
    /// Computes BMI from weight in kilograms and height in centimetres.
    pub fn calculate(weight_kg: f64, height_cm: f64) -> Result<Self, ValidationError> {
        if !weight_kg.is_finite() || weight_kg <= 0.0 {
            return Err(ValidationError::invalid_format("weight_kg", "must be a positive number"));
        }
        if !height_cm.is_finite() || height_cm <= 0.0 {
            return Err(ValidationError::invalid_format("height_cm", "must be a positive number"));
        }

        let height_m = height_cm / 100.0;
        let bmi = (weight_kg / (height_m * height_m) * 10.0).round() / 10.0;

        Ok(Self {
            weight_kg,
            height_cm,
            bmi,
            category: BmiCategory::classify(bmi),
        })
    }

    pub fn suggestion(&self) -> &'static str {
        self.category.suggestion()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_weight_example() {
        let reading = BmiReading::calculate(60.0, 165.0).unwrap();
        assert!((reading.bmi - 22.0).abs() < 1e-9);
        assert_eq!(reading.category, BmiCategory::Normal);
        assert_eq!(reading.category.to_string(), "Normal weight");
    }

    #[test]
    fn classifies_the_displayed_rounded_value() {
        // 24.86 displays as 24.9, which is already overweight.
        let reading = BmiReading::calculate(70.0, 167.8).unwrap();
        assert!((reading.bmi - 24.9).abs() < 1e-9);
        assert_eq!(reading.category, BmiCategory::Overweight);
    }

    #[test]
    fn band_edges() {
        assert_eq!(BmiCategory::classify(18.49), BmiCategory::Underweight);
        assert_eq!(BmiCategory::classify(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::classify(24.9), BmiCategory::Overweight);
        assert_eq!(BmiCategory::classify(29.89), BmiCategory::Overweight);
        assert_eq!(BmiCategory::classify(29.9), BmiCategory::Obese);
    }

    #[test]
    fn rejects_non_positive_or_non_finite_inputs() {
        assert!(BmiReading::calculate(0.0, 165.0).is_err());
        assert!(BmiReading::calculate(60.0, -1.0).is_err());
        assert!(BmiReading::calculate(f64::NAN, 165.0).is_err());
        assert!(BmiReading::calculate(60.0, f64::INFINITY).is_err());
    }

    #[test]
    fn each_category_has_a_suggestion() {
        for category in [
            BmiCategory::Underweight,
            BmiCategory::Normal,
            BmiCategory::Overweight,
            BmiCategory::Obese,
        ] {
            assert!(!category.suggestion().is_empty());
        }
    }
}
