//! Human-readable instruction summaries for editors and logs.

use std::fmt;

use crate::heightmap::INFINITY;

use super::{HeightmapInstruction, Parameter};

impl HeightmapInstruction {
    /// The operation's relevant arguments, e.g. `Height = 4, Offset = -1`.
    pub fn summary(&self) -> String {
        let op = self.operation();
        if !op.is_recognized() {
            return "Unknown Operation".to_string();
        }

        let parameters = op.parameters();
        if parameters.is_empty() {
            return if op.requires_mask() {
                "(mask-only)".to_string()
            } else {
                "(no parameters)".to_string()
            };
        }

        parameters
            .iter()
            .map(|&p| format!("{} = {}", parameter_name(p), self.parameter_value(p)))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn parameter_value(&self, parameter: Parameter) -> String {
        match parameter {
            Parameter::FrontEdgeDepth => self.front_edge_depth.to_string(),
            Parameter::Oblique => self.oblique.to_string(),
            Parameter::Depth => self.depth.to_string(),
            Parameter::Slope => self.slope.to_string(),
            Parameter::Height if self.height == INFINITY => "Infinity".to_string(),
            Parameter::Height => self.height.to_string(),
            Parameter::Offset => self.offset.to_string(),
        }
    }
}

fn parameter_name(parameter: Parameter) -> &'static str {
    match parameter {
        Parameter::FrontEdgeDepth => "FrontEdgeDepth",
        Parameter::Oblique => "Oblique",
        Parameter::Depth => "Depth",
        Parameter::Slope => "Slope",
        Parameter::Height => "Height",
        Parameter::Offset => "Offset",
    }
}

impl fmt::Display for HeightmapInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.operation(), self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heightmap::Oblique;
    use crate::instruction::HeightmapOp;

    #[test]
    fn test_infinity_height_token() {
        let instruction = HeightmapInstruction::new(HeightmapOp::ClearToHeight).with_height(INFINITY);
        assert_eq!(instruction.to_string(), "ClearToHeight: Height = Infinity");

        let instruction = instruction.with_height(254);
        assert_eq!(instruction.summary(), "Height = 254");
    }

    #[test]
    fn test_only_relevant_fields_shown() {
        let instruction = HeightmapInstruction::new(HeightmapOp::SetFromFrontEdge)
            .with_front_edge_depth(3)
            .with_depth(8)
            .with_oblique(Oblique::Left)
            .with_slope(-1)
            .with_offset(2)
            .with_height(99);
        assert_eq!(
            instruction.summary(),
            "FrontEdgeDepth = 3, Depth = 8, Oblique = Left, Slope = -1, Offset = 2"
        );

        let instruction = HeightmapInstruction::new(HeightmapOp::SetFromSideOblique)
            .with_oblique(Oblique::Right)
            .with_offset(-4)
            .with_depth(50);
        assert_eq!(instruction.summary(), "Oblique = Right, Offset = -4");
    }

    #[test]
    fn test_parameterless_summaries() {
        assert_eq!(
            HeightmapInstruction::new(HeightmapOp::SetFromRailingMask).summary(),
            "(mask-only)"
        );
        assert_eq!(
            HeightmapInstruction::new(HeightmapOp::FillRight).summary(),
            "(no parameters)"
        );
        assert_eq!(
            HeightmapInstruction::new(HeightmapOp::Unrecognized(31)).to_string(),
            "Unrecognized(31): Unknown Operation"
        );
    }

    #[test]
    fn test_every_operation_has_a_summary() {
        for op in HeightmapOp::ALL {
            let text = HeightmapInstruction::new(op).to_string();
            assert!(text.starts_with(op.name()));
            assert!(!text.contains("Unknown"));
        }
    }
}
