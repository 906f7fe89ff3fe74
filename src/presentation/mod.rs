/// Presentation layer: the `gitlane` command line
pub mod cli;
