use std::{
    f64::consts::TAU,
    fmt,
};

use crate::{
    error::{ConfigError, QuatResult},
    matrix::Mat4,
    quaternion::{rotate_orthonormal_basis, Quaternion},
    vector::Vec3,
};


/// Parsing states.
#[derive(Clone, Copy, PartialEq)]
enum Parse {
    None,
    Angle,
    Turns,
    Axis,
    Method,
    Format,
}
impl Parse {
    fn flag(&self) -> &'static str {
        match self {
            Parse::None   => "",
            Parse::Angle  => "-angle",
            Parse::Turns  => "-turns",
            Parse::Axis   => "-axis",
            Parse::Method => "-method",
            Parse::Format => "-format",
        }
    }
}

/// Which construction produces the rotation matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Method {
    Quaternion,
    Rodrigues,
}

/// How the 16 entries are printed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Layout {
    Rows,
    Flat,
    Cols,
}


/// User defined configuration settings.
#[derive(Clone, Debug)]
pub struct Config {
    pub angle: f64,
    pub axis: Vec3,
    pub method: Method,
    pub layout: Layout,
}
impl Config {
    /// Create a new Config with the specified command line arguments.
    pub fn new(args: Vec<String>) -> Result<Config, ConfigError> {
        let mut parser = Parse::None;
        let mut cfg    = Config::default();

        for arg in args.into_iter() {
            if parser == Parse::None {
                parser = match arg.as_str() {
                    "-angle"  => Parse::Angle,
                    "-turns"  => Parse::Turns,
                    "-axis"   => Parse::Axis,
                    "-method" => Parse::Method,
                    "-format" => Parse::Format,
                    _ => return Err(ConfigError::UnknownFlag(arg.clone())),
                };
                continue;
            }
            match parser {
                Parse::Angle => {
                    cfg.angle = parse_number(&arg)
                        .ok_or_else(|| ConfigError::InvalidAngle(arg.clone()))?;
                }
                Parse::Turns => {
                    let turns = parse_number(&arg)
                        .ok_or_else(|| ConfigError::InvalidAngle(arg.clone()))?;
                    cfg.angle = turns * TAU;
                }
                Parse::Axis => {
                    cfg.axis = parse_axis(&arg)
                        .ok_or_else(|| ConfigError::InvalidAxis(arg.clone()))?;
                }
                Parse::Method => {
                    cfg.method = match arg.as_str() {
                        "quat"      => Method::Quaternion,
                        "rodrigues" => Method::Rodrigues,
                        _ => return Err(ConfigError::InvalidMethod(arg.clone())),
                    };
                }
                Parse::Format => {
                    cfg.layout = match arg.as_str() {
                        "rows" => Layout::Rows,
                        "flat" => Layout::Flat,
                        "cols" => Layout::Cols,
                        _ => return Err(ConfigError::InvalidFormat(arg.clone())),
                    };
                }
                Parse::None => {},
            }
            parser = Parse::None;
        }
        if parser != Parse::None {
            return Err(ConfigError::MissingValue(parser.flag().to_string()));
        }
        Ok(cfg)
    }

    /// Build the configured rotation.
    pub fn matrix(&self) -> QuatResult<Mat4> {
        match self.method {
            Method::Quaternion => Quaternion::rotate_about_axis(self.angle, self.axis),
            Method::Rodrigues  => Ok(rotate_orthonormal_basis(self.angle, self.axis)),
        }
    }

    /// Format `mat` in the configured layout.
    pub fn render(&self, mat: &Mat4) -> String {
        let join = |m: [f64; 16]| {
            m.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(",")
        };
        match self.layout {
            Layout::Rows => mat.to_string(),
            Layout::Flat => join(mat.to_array()),
            Layout::Cols => join(mat.to_cols_array()),
        }
    }
}
impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "
            \rRotation
            \r=============================================================
            \rAngle:  {} rad
            \rAxis:   {}
            \rMethod: {:?}
            \rFormat: {:?}",
            self.angle,
            self.axis,
            self.method,
            self.layout,
        )
    }
}
impl Default for Config {
    fn default() -> Self {
        Self {
            angle: 0.0,
            axis: Vec3::unit_z(),
            method: Method::Quaternion,
            layout: Layout::Rows,
        }
    }
}

fn parse_number(arg: &str) -> Option<f64> {
    arg.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `x`, `y`, `z`, or three comma separated numbers. The result is unit length.
fn parse_axis(arg: &str) -> Option<Vec3> {
    let axis = match arg {
        "x" => Vec3::unit_x(),
        "y" => Vec3::unit_y(),
        "z" => Vec3::unit_z(),
        _ => {
            let parts = arg
                .split(',')
                .map(parse_number)
                .collect::<Option<Vec<f64>>>()?;
            if parts.len() != 3 {
                return None;
            }
            Vec3::new(parts[0], parts[1], parts[2])
        }
    };
    let len = axis.len();
    if len == 0.0 {
        return None;
    }
    Some(axis * (1.0 / len))
}


#[cfg(test)]
fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn defaults_without_arguments() {
    let cfg = Config::new(Vec::new()).unwrap();

    assert_eq!(cfg.angle, 0.0);
    assert_eq!(cfg.axis, Vec3::unit_z());
    assert_eq!(cfg.method, Method::Quaternion);
    assert_eq!(cfg.layout, Layout::Rows);
    assert_eq!(cfg.matrix().unwrap(), Mat4::identity());
}

#[test]
fn parses_all_flags() {
    let cfg = Config::new(args(&[
        "-angle", "1.5", "-axis", "0,3,4", "-method", "rodrigues", "-format", "cols",
    ])).unwrap();

    assert_eq!(cfg.angle, 1.5);
    approx::assert_abs_diff_eq!(cfg.axis.len(), 1.0, epsilon = 1e-12);
    approx::assert_abs_diff_eq!(cfg.axis.z, 0.8, epsilon = 1e-12);
    assert_eq!(cfg.method, Method::Rodrigues);
    assert_eq!(cfg.layout, Layout::Cols);
}

#[test]
fn turns_are_fractions_of_a_full_turn() {
    let cfg = Config::new(args(&["-turns", "0.25", "-axis", "y"])).unwrap();

    approx::assert_abs_diff_eq!(cfg.angle, std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
    assert_eq!(cfg.axis, Vec3::unit_y());
}

#[test]
fn rejects_bad_arguments() {
    assert_eq!(
        Config::new(args(&["-angle", "abc"])).unwrap_err(),
        ConfigError::InvalidAngle("abc".to_string()),
    );
    assert_eq!(
        Config::new(args(&["-axis", "0,0,0"])).unwrap_err(),
        ConfigError::InvalidAxis("0,0,0".to_string()),
    );
    assert_eq!(
        Config::new(args(&["-axis", "1,2"])).unwrap_err(),
        ConfigError::InvalidAxis("1,2".to_string()),
    );
    assert_eq!(
        Config::new(args(&["-method", "euler"])).unwrap_err(),
        ConfigError::InvalidMethod("euler".to_string()),
    );
    assert_eq!(
        Config::new(args(&["-format", "csv"])).unwrap_err(),
        ConfigError::InvalidFormat("csv".to_string()),
    );
    assert_eq!(
        Config::new(args(&["--help"])).unwrap_err(),
        ConfigError::UnknownFlag("--help".to_string()),
    );
    assert_eq!(
        Config::new(args(&["-axis"])).unwrap_err(),
        ConfigError::MissingValue("-axis".to_string()),
    );
}

#[test]
fn both_methods_render_the_same_rotation() {
    let quat = Config::new(args(&["-angle", "0.8", "-axis", "1,1,0", "-format", "flat"])).unwrap();
    let rodr = Config::new(args(&["-angle", "0.8", "-axis", "1,1,0", "-method", "rodrigues"])).unwrap();

    let a = quat.matrix().unwrap();
    let b = rodr.matrix().unwrap();
    for (x, y) in a.m.iter().zip(b.m.iter()) {
        approx::assert_abs_diff_eq!(*x, *y, epsilon = 1e-9);
    }
    assert_eq!(quat.render(&a).split(',').count(), 16);
}

#[test]
fn column_layout_transposes() {
    let cfg = Config::new(args(&["-turns", "0.25", "-format", "cols"])).unwrap();
    let m = Mat4::new(
        1.0, 2.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    );
    assert!(cfg.render(&m).starts_with("1,0,0,0,2,1,"));
}
