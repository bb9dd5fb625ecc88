use anyhow::bail;
use clap::{Args, Subcommand};
use colored::*;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use savevault_api::TagCommands;
use savevault_tags::{Tag, TagTarget};

#[derive(Subcommand)]
pub enum TagsCommands {
    /// List all tags
    List,
    /// Create a tag
    Create {
        /// Tag name
        name: String,
        /// Hex color, #RGB or #RRGGBB
        color: String,
    },
    /// Delete a tag and detach it everywhere
    Delete {
        /// Tag name
        name: String,
    },
    /// Rename a tag
    Rename {
        old_name: String,
        new_name: String,
    },
    /// Change a tag's color
    Color {
        name: String,
        color: String,
    },
    /// List every backup and save carrying a tag
    Targets {
        name: String,
    },
    /// Show the tags on a backup or save
    Show(TargetArgs),
    /// Attach tags to a backup or save
    Attach {
        #[command(flatten)]
        target: TargetArgs,
        /// Tag names to attach
        #[arg(required = true)]
        tags: Vec<String>,
    },
    /// Detach tags from a backup or save
    Detach {
        #[command(flatten)]
        target: TargetArgs,
        /// Tag names to detach
        #[arg(required = true)]
        tags: Vec<String>,
    },
}

#[derive(Args)]
pub struct TargetArgs {
    /// Save, by path relative to the saves directory
    #[arg(long, conflicts_with = "backup")]
    save: Option<String>,
    /// Backup, given as the save name and the backup file name
    #[arg(long, num_args = 2, value_names = ["SAVE", "BACKUP"])]
    backup: Option<Vec<String>>,
}

pub async fn handle_tags_command(
    commands: &TagCommands,
    command: TagsCommands,
) -> anyhow::Result<()> {
    match command {
        TagsCommands::List => list_tags(commands).await,
        TagsCommands::Create { name, color } => {
            let tag = commands.create_tag(&name, &color).await?;
            println!("{} {}", "Created tag".green(), paint(&tag));
            Ok(())
        }
        TagsCommands::Delete { name } => {
            commands.delete_tag(&name).await?;
            println!("{} {}", "Deleted tag".green(), name.bold());
            Ok(())
        }
        TagsCommands::Rename { old_name, new_name } => {
            let tag = commands.rename_tag(&old_name, &new_name).await?;
            println!("{} {} -> {}", "Renamed tag".green(), old_name, paint(&tag));
            Ok(())
        }
        TagsCommands::Color { name, color } => {
            let tag = commands.update_tag_color(&name, &color).await?;
            println!("{} {} ({})", "Updated tag".green(), paint(&tag), tag.color);
            Ok(())
        }
        TagsCommands::Targets { name } => list_targets(commands, &name).await,
        TagsCommands::Show(target) => show_target(commands, &target).await,
        TagsCommands::Attach { target, tags } => {
            match resolve(&target)? {
                TagTarget::Backup {
                    save_name,
                    backup_name,
                } => {
                    commands
                        .add_tags_to_backup(&save_name, &backup_name, &tags)
                        .await?
                }
                TagTarget::Save { relative_path } => {
                    commands.add_tags_to_save(&relative_path, &tags).await?
                }
            }
            show_target(commands, &target).await
        }
        TagsCommands::Detach { target, tags } => {
            match resolve(&target)? {
                TagTarget::Backup {
                    save_name,
                    backup_name,
                } => {
                    commands
                        .remove_tags_from_backup(&save_name, &backup_name, &tags)
                        .await?
                }
                TagTarget::Save { relative_path } => {
                    commands.remove_tags_from_save(&relative_path, &tags).await?
                }
            }
            show_target(commands, &target).await
        }
    }
}

async fn list_tags(commands: &TagCommands) -> anyhow::Result<()> {
    let tags = commands.get_all_tags().await?;

    if tags.is_empty() {
        println!("{}", "No tags found".yellow());
        println!(
            "{}",
            "Use 'savevault tags create <name> <color>' to create one".dimmed()
        );
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Color"]);

    for tag in &tags {
        table.add_row(vec![tag.name.clone(), tag.color.clone()]);
    }

    println!("{}", table);
    println!("Total: {} tags", tags.len().to_string().cyan());
    Ok(())
}

async fn list_targets(commands: &TagCommands, name: &str) -> anyhow::Result<()> {
    let targets = commands.get_targets_for_tag(name).await?;

    if targets.is_empty() {
        println!("{}", format!("Nothing is tagged '{}'", name).yellow());
        return Ok(());
    }

    for target in &targets {
        match target {
            TagTarget::Backup {
                save_name,
                backup_name,
            } => println!("  {} {}/{}", "backup".blue(), save_name, backup_name),
            TagTarget::Save { relative_path } => {
                println!("  {}   {}", "save".magenta(), relative_path)
            }
        }
    }
    Ok(())
}

async fn show_target(commands: &TagCommands, args: &TargetArgs) -> anyhow::Result<()> {
    let tags = match resolve(args)? {
        TagTarget::Backup {
            save_name,
            backup_name,
        } => commands.get_backup_tags(&save_name, &backup_name).await?,
        TagTarget::Save { relative_path } => commands.get_save_tags(&relative_path).await?,
    };

    if tags.is_empty() {
        println!("{}", "No tags".dimmed());
    } else {
        let painted: Vec<String> = tags.iter().map(|t| paint(t).to_string()).collect();
        println!("{}", painted.join(", "));
    }
    Ok(())
}

fn resolve(args: &TargetArgs) -> anyhow::Result<TagTarget> {
    match (&args.save, &args.backup) {
        (Some(path), None) => Ok(TagTarget::save(path)),
        (None, Some(parts)) if parts.len() == 2 => Ok(TagTarget::backup(&parts[0], &parts[1])),
        _ => bail!("Specify either --save <PATH> or --backup <SAVE> <BACKUP>"),
    }
}

/// Tag name drawn in its own color
fn paint(tag: &Tag) -> ColoredString {
    match hex_to_rgb(&tag.color) {
        Some((r, g, b)) => tag.name.truecolor(r, g, b).bold(),
        None => tag.name.bold(),
    }
}

fn hex_to_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#').filter(|h| h.is_ascii())?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();

    match hex.len() {
        3 => {
            let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Some((expand(0)?, expand(1)?, expand(2)?))
        }
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        _ => None,
    }
}
