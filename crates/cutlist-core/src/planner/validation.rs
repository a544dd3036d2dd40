use crate::bins::LENGTH_EPSILON;
use crate::types::*;
use std::collections::HashSet;

const INCHES_PER_FOOT: f64 = 12.0;

impl CutRequest {
    /// Validates a raw input document and pads every cut with the kerf.
    ///
    /// The first problem found is returned; nothing is packed on error.
    pub fn from_input(input: &CutListInput) -> Result<Self> {
        let feet = input.board_length_ft;
        if !feet.is_finite() || feet <= 0.0 || feet.fract() != 0.0 {
            return Err(CutlistError::InvalidNumericInput(format!(
                "board length must be a positive whole number of feet, got {}",
                feet
            )));
        }

        if !input.margin.is_finite() || input.margin < 0.0 {
            return Err(CutlistError::InvalidNumericInput(format!(
                "margin must not be negative, got {}",
                input.margin
            )));
        }

        if !input.kerf.is_finite() || input.kerf <= 0.0 {
            return Err(CutlistError::InvalidNumericInput(format!(
                "kerf must be positive, got {}",
                input.kerf
            )));
        }

        if input.margin < input.kerf {
            return Err(CutlistError::InvalidNumericInput(format!(
                "margin ({}) must be at least the kerf ({})",
                input.margin, input.kerf
            )));
        }

        let board_length = feet * INCHES_PER_FOOT;
        // The kerf after the final cut falls inside the end margin
        let usable_length = board_length - input.margin + input.kerf;
        if usable_length <= 0.0 {
            return Err(CutlistError::InvalidNumericInput(format!(
                "margin {} leaves no usable length on a {} board",
                input.margin, board_length
            )));
        }

        let mut seen = HashSet::new();
        let mut parts = Vec::with_capacity(input.parts.len() + 1);

        for part in &input.parts {
            let name = part.name.trim();
            if name.is_empty() {
                return Err(CutlistError::InvalidPartName(
                    "part names must not be blank".to_string(),
                ));
            }
            if !seen.insert(name.to_string()) {
                return Err(CutlistError::DuplicatePartName(name.to_string()));
            }

            let label = format!("part '{}'", name);
            let cuts = pad_cuts(&part.cuts, input.kerf, usable_length, &label)?;
            parts.push(PartCuts::Grouped {
                name: name.to_string(),
                cuts,
            });
        }

        let cuts = pad_cuts(&input.cuts, input.kerf, usable_length, "ungrouped cuts")?;
        parts.push(PartCuts::Ungrouped { cuts });

        Ok(Self {
            board_length,
            usable_length,
            kerf: input.kerf,
            parts,
        })
    }
}

fn pad_cuts(raw: &[f64], kerf: f64, usable: f64, label: &str) -> Result<Vec<f64>> {
    raw.iter()
        .map(|&length| {
            if !length.is_finite() || length <= 0.0 {
                return Err(CutlistError::InvalidNumericInput(format!(
                    "cut lengths in {} must be positive, got {}",
                    label, length
                )));
            }
            let padded = length + kerf;
            if padded > usable + LENGTH_EPSILON {
                return Err(CutlistError::OversizedCut {
                    part: label.to_string(),
                    length,
                    usable,
                });
            }
            Ok(padded)
        })
        .collect()
}
