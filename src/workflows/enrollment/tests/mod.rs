mod common;
mod equivalence;
