use crate::db::kv::SqliteStore;
use crate::libs::brands::load_brands;
use crate::libs::config::Config;
use crate::libs::formatter::DATE_FORMAT;
use crate::libs::messages::Message;
use crate::libs::prescription::{EyeTarget, Prescription, PrescriptionField};
use crate::libs::view::View;
use crate::{msg_error_anyhow, msg_info, msg_success, msg_warning};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct PrescriptionArgs {
    #[command(subcommand)]
    command: Option<PrescriptionCommand>,
}

#[derive(Debug, Subcommand)]
enum PrescriptionCommand {
    #[command(about = "Show the prescription (default)")]
    Show,
    #[command(about = "Set or clear prescription values")]
    Set(SetArgs),
    #[command(about = "Set the expiration date (YYYY-MM-DD, or 'none')")]
    Expires { date: String },
    #[command(about = "Attach a photo of the prescription")]
    Image { path: String },
    #[command(about = "Remove the prescription photo reference")]
    ClearImage,
    #[command(about = "List brands from the configured brands file")]
    Brands,
}

#[derive(Debug, Args)]
struct SetArgs {
    #[arg(long, short, default_value = "both", help = "left, right or both")]
    eye: EyeTarget,
    #[arg(long, allow_hyphen_values = true)]
    sph: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    cyl: Option<String>,
    #[arg(long)]
    axis: Option<String>,
    #[arg(long)]
    add: Option<String>,
    #[arg(long)]
    bc: Option<String>,
    #[arg(long)]
    dia: Option<String>,
    #[arg(long)]
    brand: Option<String>,
    #[arg(long, help = "Use the same values for both eyes")]
    same: Option<bool>,
    #[arg(long, value_name = "FIELD", help = "Fields to clear, e.g. --clear axis --clear add")]
    clear: Vec<PrescriptionField>,
}

impl SetArgs {
    fn values(&self) -> Vec<(PrescriptionField, &str)> {
        [
            (PrescriptionField::Sph, &self.sph),
            (PrescriptionField::Cyl, &self.cyl),
            (PrescriptionField::Axis, &self.axis),
            (PrescriptionField::Add, &self.add),
            (PrescriptionField::Bc, &self.bc),
            (PrescriptionField::Dia, &self.dia),
            (PrescriptionField::Brand, &self.brand),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|value| (field, value)))
        .collect()
    }
}

pub async fn cmd(args: PrescriptionArgs) -> Result<()> {
    let config = Config::read()?;
    let mut store = SqliteStore::new()?;
    let mut prescription = Prescription::load(&store);

    match args.command.unwrap_or(PrescriptionCommand::Show) {
        PrescriptionCommand::Show => {
            if prescription == Prescription::default() {
                msg_info!(Message::PrescriptionEmpty);
                return Ok(());
            }
            View::prescription(&prescription)?;
            show_expiration(&prescription);
            if let Some(path) = &prescription.image_path {
                msg_info!(Message::PrescriptionImage(path.clone()));
            }
            return Ok(());
        }
        PrescriptionCommand::Set(set) => {
            let values = set.values();
            if values.is_empty() && set.clear.is_empty() && set.same.is_none() {
                msg_info!(Message::PrescriptionNothingToSet);
                return Ok(());
            }

            if let Some(same) = set.same {
                prescription.same_for_both_eyes = same;
            }
            let brands = brand_catalog(&config);
            for (field, value) in values {
                prescription.set_field(set.eye, field, Some(value), &brands)?;
            }
            for field in &set.clear {
                prescription.set_field(set.eye, *field, None, &brands)?;
            }
        }
        PrescriptionCommand::Expires { date } => {
            prescription.expiration = match date.trim() {
                "none" | "" => None,
                input => Some(
                    NaiveDate::parse_from_str(input, DATE_FORMAT)
                        .map_err(|_| msg_error_anyhow!(Message::InvalidDateFormat(input.to_string())))?,
                ),
            };
        }
        PrescriptionCommand::Image { path } => {
            prescription.attach_image(&path)?;
            msg_success!(Message::PrescriptionImageAttached(path));
        }
        PrescriptionCommand::ClearImage => {
            prescription.detach_image();
            msg_success!(Message::PrescriptionImageCleared);
        }
        PrescriptionCommand::Brands => {
            let Some(path) = config.brands_file.as_deref() else {
                msg_info!(Message::BrandsFileNotConfigured);
                return Ok(());
            };
            let brands = load_brands(path)?;
            if brands.is_empty() {
                msg_info!(Message::BrandsEmpty);
            } else {
                View::brands(&brands)?;
            }
            return Ok(());
        }
    }

    prescription.save(&mut store)?;
    msg_success!(Message::PrescriptionSaved);
    show_expiration(&prescription);
    Ok(())
}

/// Brands from the configured file. An unreadable file disables brand checks.
fn brand_catalog(config: &Config) -> Vec<String> {
    let Some(path) = config.brands_file.as_deref() else {
        return Vec::new();
    };
    load_brands(path).unwrap_or_else(|e| {
        msg_warning!(Message::BrandsLoadFailed(e.to_string()));
        Vec::new()
    })
}

fn show_expiration(prescription: &Prescription) {
    let today = Local::now().date_naive();
    let (Some(expiration), Some(days)) = (prescription.expiration, prescription.days_until_expiration(today)) else {
        return;
    };
    let date = expiration.format(DATE_FORMAT).to_string();
    if prescription.is_expired(today) {
        msg_warning!(Message::PrescriptionExpired(date));
    } else {
        msg_info!(Message::PrescriptionExpiresIn(date, days));
    }
}
