use super::context::AppContext;
use crate::domain::Image;
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct ImageCommand {
    #[command(subcommand)]
    pub action: ImageAction,
}

#[derive(Subcommand, Debug)]
pub enum ImageAction {
    /// Pull an image from its registry
    Pull { name: String },
    /// Push an image to its registry
    Push { name: String },
    /// Print the image ID
    Id { name: String },
}

pub fn run(cmd: ImageCommand, ctx: &AppContext) -> Result<()> {
    match cmd.action {
        ImageAction::Pull { name } => ctx.client.image_pull(&Image::new(name))?,
        ImageAction::Push { name } => ctx.client.image_push(&Image::new(name))?,
        ImageAction::Id { name } => {
            let id = ctx.client.image_get_id(&Image::new(name))?;
            println!("{id}");
        }
    }
    Ok(())
}
