use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use bloglist::list_helper::{
    favorite_blog, most_blogs, most_likes, total_likes, AuthorBlogs, AuthorLikes,
};
use bloglist::models::models::Blog;

#[derive(Parser)]
#[command(name = "blog-stats")]
#[command(about = "Summarize a JSON export of blog records", long_about = None)]
struct Args {
    /// Path to a JSON array of blog records
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Print compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    blogs: usize,
    total_likes: u64,
    favorite_blog: Option<&'a Blog>,
    most_blogs: Option<AuthorBlogs>,
    most_likes: Option<AuthorLikes>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let blogs: Vec<Blog> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of blogs", args.input.display()))?;

    println!("{}", render(&report(&blogs), args.compact)?);

    Ok(())
}

fn report(blogs: &[Blog]) -> Report<'_> {
    Report {
        blogs: blogs.len(),
        total_likes: total_likes(blogs),
        favorite_blog: favorite_blog(blogs),
        most_blogs: most_blogs(blogs),
        most_likes: most_likes(blogs),
    }
}

fn render(report: &Report<'_>, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(report)
    } else {
        serde_json::to_string_pretty(report)
    }
}
