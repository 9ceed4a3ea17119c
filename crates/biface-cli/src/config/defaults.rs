pub struct DefaultsConfig {
    pub disulfide_cutoff: f64,
    pub clash_cutoff: f64,
    pub dielectric: String,
    pub stages: Vec<String>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            disulfide_cutoff: 2.5,
            clash_cutoff: 1.0,
            dielectric: "mehler-solmajer".to_string(),
            stages: vec![
                "models=first".to_string(),
                "altloc=occupancy".to_string(),
                "getss".to_string(),
                "clashes".to_string(),
            ],
        }
    }
}
