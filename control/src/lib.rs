use log::warn;
use thiserror::Error;

use std::fs;
use std::path::Path;

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("cannot read control file: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: expected `key = value`, got `{text}`")]
    Malformed { line: usize, text: String },
    #[error("line {line}: unknown parameter `{key}`")]
    UnknownParameter { line: usize, key: String },
    #[error("line {line}: invalid value `{value}` for `{key}`")]
    InvalidValue {
        line: usize,
        key: String,
        value: String,
    },
}

// Run-time parameters of the slab analysis and k-path generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    layer_min_gap: f64,
    slab_min_gap: f64,
    slab_wrap_padding: f64,
    symprec: f64,
    bravais_length_tolerance: f64,
    bravais_angle_tolerance: f64,
    kpath_format: String, // vasp, aims, rmg
}

impl Default for Control {
    fn default() -> Self {
        Control {
            layer_min_gap: 1.9,
            slab_min_gap: 12.0,
            slab_wrap_padding: 5.0,
            symprec: 0.5,
            bravais_length_tolerance: 0.1,
            bravais_angle_tolerance: 0.1,
            kpath_format: "vasp".to_string(),
        }
    }
}

impl Control {
    pub fn new() -> Control {
        Control::default()
    }

    pub fn get_layer_min_gap(&self) -> f64 {
        self.layer_min_gap
    }

    pub fn get_slab_min_gap(&self) -> f64 {
        self.slab_min_gap
    }

    pub fn get_slab_wrap_padding(&self) -> f64 {
        self.slab_wrap_padding
    }

    pub fn get_symprec(&self) -> f64 {
        self.symprec
    }

    pub fn get_bravais_length_tolerance(&self) -> f64 {
        self.bravais_length_tolerance
    }

    pub fn get_bravais_angle_tolerance(&self) -> f64 {
        self.bravais_angle_tolerance
    }

    pub fn get_kpath_format(&self) -> &str {
        &self.kpath_format
    }

    pub fn read_file<P: AsRef<Path>>(&mut self, inpfile: P) -> Result<(), ControlError> {
        let content = fs::read_to_string(inpfile)?;

        self.parse_str(&content)
    }

    // One `key = value` pair per line; blank lines and `#` comments are skipped.
    pub fn parse_str(&mut self, content: &str) -> Result<(), ControlError> {
        for (i, raw) in content.lines().enumerate() {
            let line_no = i + 1;

            let line = raw.split('#').next().unwrap_or("").trim();

            if line.is_empty() {
                continue;
            }

            let s: Vec<&str> = line.split('=').map(|x| x.trim()).collect();

            if s.len() != 2 || s[0].is_empty() {
                return Err(ControlError::Malformed {
                    line: line_no,
                    text: raw.to_string(),
                });
            }

            let (key, value) = (s[0], s[1]);

            match key {
                "layer_min_gap" => self.layer_min_gap = parse_f64(line_no, key, value)?,

                "slab_min_gap" => self.slab_min_gap = parse_f64(line_no, key, value)?,

                "slab_wrap_padding" => self.slab_wrap_padding = parse_f64(line_no, key, value)?,

                "symprec" => self.symprec = parse_f64(line_no, key, value)?,

                "bravais_length_tolerance" => {
                    self.bravais_length_tolerance = parse_f64(line_no, key, value)?
                }

                "bravais_angle_tolerance" => {
                    self.bravais_angle_tolerance = parse_f64(line_no, key, value)?
                }

                "kpath_format" => {
                    let format = value.to_lowercase();

                    if !["vasp", "aims", "rmg"].contains(&format.as_str()) {
                        return Err(invalid(line_no, key, value));
                    }

                    self.kpath_format = format;
                }

                _ => {
                    warn!("unknown parameter : {}", raw);

                    return Err(ControlError::UnknownParameter {
                        line: line_no,
                        key: key.to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn display(&self) {
        const OUT_WIDTH1: usize = 28;
        const OUT_WIDTH2: usize = 18;

        println!("   {:-^80}", " control parameters ");
        println!();

        let rows: [(&str, String, &str); 7] = [
            ("layer_min_gap", format!("{:.3}", self.layer_min_gap), "A"),
            ("slab_min_gap", format!("{:.3}", self.slab_min_gap), "A"),
            ("slab_wrap_padding", format!("{:.3}", self.slab_wrap_padding), "A"),
            ("symprec", format!("{:.3}", self.symprec), "A"),
            (
                "bravais_length_tolerance",
                format!("{:.3}", self.bravais_length_tolerance),
                "A",
            ),
            (
                "bravais_angle_tolerance",
                format!("{:.3}", self.bravais_angle_tolerance),
                "deg",
            ),
            ("kpath_format", self.kpath_format.clone(), ""),
        ];

        for (key, value, unit) in rows.iter() {
            println!(
                "   {:<width1$} = {:>width2$} {}",
                key,
                value,
                unit,
                width1 = OUT_WIDTH1,
                width2 = OUT_WIDTH2
            );
        }

        println!();
    }
}

fn parse_f64(line: usize, key: &str, value: &str) -> Result<f64, ControlError> {
    value.parse::<f64>().map_err(|_| invalid(line, key, value))
}

fn invalid(line: usize, key: &str, value: &str) -> ControlError {
    ControlError::InvalidValue {
        line,
        key: key.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_control_defaults() {
        let control = Control::new();

        assert_eq!(control.get_layer_min_gap(), 1.9);
        assert_eq!(control.get_slab_min_gap(), 12.0);
        assert_eq!(control.get_slab_wrap_padding(), 5.0);
        assert_eq!(control.get_symprec(), 0.5);
        assert_eq!(control.get_bravais_length_tolerance(), 0.1);
        assert_eq!(control.get_bravais_angle_tolerance(), 0.1);
        assert_eq!(control.get_kpath_format(), "vasp");
    }

    #[test]
    fn test_control_parse_overrides() {
        let mut control = Control::new();

        control
            .parse_str(
                "# slab settings\n\
                 slab_min_gap = 8.0\n\
                 \n\
                 layer_min_gap = 1.2   # tighter layers\n\
                 kpath_format = AIMS\n",
            )
            .unwrap();

        assert_eq!(control.get_slab_min_gap(), 8.0);
        assert_eq!(control.get_layer_min_gap(), 1.2);
        assert_eq!(control.get_kpath_format(), "aims");
        assert_eq!(control.get_symprec(), 0.5);
    }

    #[test]
    fn test_control_unknown_parameter() {
        let mut control = Control::new();

        let err = control.parse_str("ecut_wfc = 30\n").unwrap_err();

        assert!(matches!(
            err,
            ControlError::UnknownParameter { line: 1, ref key } if key == "ecut_wfc"
        ));
    }

    #[test]
    fn test_control_invalid_value() {
        let mut control = Control::new();

        let err = control.parse_str("symprec = 0.1\nsymprec = loose\n").unwrap_err();
        assert!(matches!(err, ControlError::InvalidValue { line: 2, .. }));

        let err = control.parse_str("kpath_format = qe\n").unwrap_err();
        assert!(matches!(err, ControlError::InvalidValue { line: 1, .. }));
    }

    #[test]
    fn test_control_malformed_line() {
        let mut control = Control::new();

        let err = control.parse_str("slab_min_gap 12\n").unwrap_err();
        assert!(matches!(err, ControlError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_control_read_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bravais_angle_tolerance = 0.5").unwrap();

        let mut control = Control::new();
        control.read_file(file.path()).unwrap();

        assert_eq!(control.get_bravais_angle_tolerance(), 0.5);
        control.display();
    }

    #[test]
    fn test_control_read_missing_file() {
        let mut control = Control::new();

        let err = control.read_file("/nonexistent/in.ctrl").unwrap_err();
        assert!(matches!(err, ControlError::Io(_)));
    }
}
