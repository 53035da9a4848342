use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use avl::Tree;

#[derive(Parser, Debug)]
#[command(name = "avl", about = "Build an AVL tree from the command line and print it")]
struct Cli {
    /// Keys to insert, in order. Keys already in the tree are ignored.
    #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
    insert: Vec<i64>,
    /// Keys to delete after all insertions, in order. Missing keys are ignored.
    #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
    delete: Vec<i64>,
    /// Print the keys in ascending order instead of the sideways tree.
    #[arg(long)]
    inorder: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let tree = build(&cli)?;

    if cli.inorder {
        let keys: Vec<String> = tree.iter().map(i64::to_string).collect();
        println!("{}", keys.join(" "));
    } else {
        println!("AVL Tree Structure:");
        print!("{}", tree.sideways());
    }

    Ok(())
}

fn build(cli: &Cli) -> Result<Tree<i64>> {
    let mut tree = Tree::new();

    for &key in &cli.insert {
        let inserted = tree
            .try_insert(key)
            .with_context(|| format!("failed to insert {key}"))?;
        if !inserted {
            info!(key, "key already present");
        }
    }
    for key in &cli.delete {
        if !tree.delete(key) {
            info!(key, "key not found");
        }
    }

    Ok(tree)
}
