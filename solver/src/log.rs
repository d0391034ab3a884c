pub mod targets {
    pub const DPLL: &str = "dpll";
    pub const BRANCHING: &str = "branching";
    pub const TREE: &str = "tree";
    pub const GENERATION: &str = "generation";
}
