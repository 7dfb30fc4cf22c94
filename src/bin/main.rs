use clap::Parser;
use elastic_riemann::physical_quantities::{Conserved, State};
use elastic_riemann::{ExactRiemannSolver, MaterialLaw, RiemannSolution, Wave};
use std::{error::Error, fmt::Display, fs, path, path::PathBuf};
use yaml_rust::{Yaml, YamlLoader};

#[derive(Debug)]
pub enum ConfigError {
    MissingParameter(String),
    InvalidParameter(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingParameter(name) => {
                write!(f, "Missing required parameter in configuration: {}", name)
            }
            ConfigError::InvalidParameter(name) => {
                write!(f, "Invalid value for parameter: {}", name)
            }
        }
    }
}

impl Error for ConfigError {}

fn parse_f64(yaml: &Yaml, section: &str, name: &str) -> Result<f64, ConfigError> {
    yaml[name]
        .as_f64()
        .or_else(|| yaml[name].as_i64().map(|v| v as f64))
        .ok_or(ConfigError::MissingParameter(format!(
            "{}:{}",
            section, name
        )))
}

struct SideCfg {
    state: State<Conserved>,
    material: MaterialLaw,
}

impl SideCfg {
    fn parse(yaml: &Yaml, section: &str) -> Result<Self, Box<dyn Error>> {
        let strain = parse_f64(yaml, section, "strain")?;
        let momentum = parse_f64(yaml, section, "momentum")?;
        let density = parse_f64(yaml, section, "density")?;
        let k1 = parse_f64(yaml, section, "linear_stiffness")?;
        let k2 = parse_f64(yaml, section, "quadratic_stiffness")?;
        Ok(Self {
            state: State::<Conserved>::new(strain, momentum),
            material: MaterialLaw::new(density, k1, k2)?,
        })
    }
}

struct SamplingCfg {
    time: f64,
    x_min: f64,
    x_max: f64,
    num_samples: usize,
    output: Option<String>,
}

impl SamplingCfg {
    fn parse(yaml: &Yaml) -> Result<Self, ConfigError> {
        let time = yaml["time"].as_f64().unwrap_or(1.);
        if time <= 0. {
            return Err(ConfigError::InvalidParameter(
                "sampling:time must be positive".to_string(),
            ));
        }
        Ok(Self {
            time,
            x_min: parse_f64(yaml, "sampling", "x_min")?,
            x_max: parse_f64(yaml, "sampling", "x_max")?,
            num_samples: yaml["num_samples"].as_i64().unwrap_or(100) as usize,
            output: yaml["output"].as_str().map(|s| s.to_string()),
        })
    }
}

struct Config {
    left: SideCfg,
    right: SideCfg,
    sampling: SamplingCfg,
}

impl Config {
    fn parse(file: PathBuf) -> Result<Self, Box<dyn Error>> {
        let docs = YamlLoader::load_from_str(&fs::read_to_string(file)?)?;
        let config_yml = &docs[0];

        Ok(Self {
            left: SideCfg::parse(&config_yml["left"], "left")?,
            right: SideCfg::parse(&config_yml["right"], "right")?,
            sampling: SamplingCfg::parse(&config_yml["sampling"])?,
        })
    }
}

#[derive(Parser)]
pub struct Cli {
    /// The path to the config file to read
    #[clap(parse(from_os_str))]
    pub config: path::PathBuf,
}

fn describe_wave(name: &str, wave: &Wave) -> String {
    match wave {
        Wave::Shock { speed } => format!("{}: shock at speed {:.8}", name, speed),
        Wave::Rarefaction { head, tail } => format!(
            "{}: rarefaction fan between speeds {:.8} and {:.8}",
            name, head, tail
        ),
        Wave::Contact => format!("{}: stationary contact", name),
    }
}

fn sampled_profiles(solution: &RiemannSolution, sampling: &SamplingCfg) -> String {
    let num_samples = sampling.num_samples.max(2);
    let dx = (sampling.x_max - sampling.x_min) / (num_samples - 1) as f64;
    let xi: Vec<f64> = (0..num_samples)
        .map(|i| (sampling.x_min + i as f64 * dx) / sampling.time)
        .collect();

    let mut table = String::from("x,xi,strain,momentum\n");
    for (&xi, state) in xi.iter().zip(solution.sample_many(&xi)) {
        table.push_str(&format!(
            "{:e},{:e},{:e},{:e}\n",
            xi * sampling.time,
            xi,
            state.strain(),
            state.momentum()
        ));
    }
    table
}

fn main() -> Result<(), Box<dyn Error>> {
    // parse command line parameters
    let args = Cli::parse();

    // read configuration
    let config = Config::parse(args.config)?;

    // Solve the Riemann problem
    let solver = ExactRiemannSolver::new(config.left.material, config.right.material);
    let solution = solver.solve(config.left.state, config.right.state)?;

    let (strain_star_l, strain_star_r) = solution.star_strains();
    println!("Star strains: {:.8}, {:.8}", strain_star_l, strain_star_r);
    println!("Star velocity: {:.8}", solution.star_velocity());
    println!("{}", describe_wave("1-wave", &solution.waves()[0]));
    println!("{}", describe_wave("contact", &solution.waves()[1]));
    println!("{}", describe_wave("2-wave", &solution.waves()[2]));

    // Sample the solution at the requested time
    let table = sampled_profiles(&solution, &config.sampling);
    match &config.sampling.output {
        Some(filename) => fs::write(filename, table)?,
        None => print!("{}", table),
    }

    println!("Done!");
    Ok(())
}
