use crate::catalog::EntityDetails;
use crate::storage::repository::{
    EntityRecord, EntityRepository, ImageRepository, UserRepository,
};
use anyhow::anyhow;
use sea_orm::DatabaseConnection;

pub async fn run(db: &DatabaseConnection, id: i32) -> anyhow::Result<()> {
    let record = EntityRepository::find_with_details(db, id)
        .await?
        .ok_or_else(|| anyhow!("entity {} not found", id))?;
    let images = ImageRepository::images_for(db, id).await?;
    let creator = match record.entity.created_by {
        Some(user_id) => UserRepository::find_by_id(db, user_id)
            .await?
            .map(|u| u.username),
        None => None,
    };

    for line in describe(&record, creator.as_deref()) {
        println!("{}", line);
    }
    for image in &images {
        println!(
            "image: {} ({})",
            image.image.as_deref().unwrap_or("-"),
            image
        );
    }
    Ok(())
}

fn describe(record: &EntityRecord, creator: Option<&str>) -> Vec<String> {
    let e = &record.entity;
    let mut lines = vec![e.to_string()];
    push_opt(&mut lines, "created by", creator);
    push_opt(&mut lines, "country of origin", e.country_of_origin.as_deref());
    push_opt(&mut lines, "ethnicity", e.ethnicity.as_deref());
    push_opt(&mut lines, "gender", e.gender.map(|g| g.as_str()));
    push_list(&mut lines, "parents", &record.parents());
    push_list(&mut lines, "descendants", &record.descendants());
    push_opt(&mut lines, "appearance", e.appearance.as_deref());
    push_opt(&mut lines, "story", e.story.as_deref());
    push_opt(&mut lines, "powers", e.powers.as_deref());

    match &record.details {
        Some(EntityDetails::Divinity(d)) => {
            lines.push(format!("cultural role: {}", d.cultural_role));
            push_opt(&mut lines, "pantheon", d.pantheon.as_deref());
            push_opt(&mut lines, "alignment", d.alignment.as_deref());
            push_list(&mut lines, "domains", &d.domains);
            push_list(&mut lines, "main symbols", &d.main_symbols);
            push_list(&mut lines, "characteristics", &d.characteristics);
            push_opt(&mut lines, "manifestations", d.manifestations.as_deref());
            push_list(&mut lines, "symbolic animals", &d.symbolic_animals);
            push_list(&mut lines, "power objects", &d.power_objects);
            push_list(&mut lines, "consorts", &d.consorts);
        }
        Some(EntityDetails::Hero(h)) => {
            push_opt(&mut lines, "titles", h.titles.as_deref());
            push_opt(&mut lines, "achievements", h.achievements.as_deref());
            push_list(&mut lines, "enemies", &h.enemies);
            push_list(&mut lines, "allies", &h.allies);
        }
        Some(EntityDetails::MythicalCreature(c)) => {
            lines.push(format!("habitat: {}", c.habitat));
            push_opt(&mut lines, "diet", c.diet.as_deref());
            push_opt(&mut lines, "size", c.size.as_deref());
            push_opt(&mut lines, "weaknesses", c.weaknesses.as_deref());
            push_opt(&mut lines, "strengths", c.strengths.as_deref());
        }
        None => lines.push("(no details)".to_string()),
    }
    lines
}

fn push_opt(lines: &mut Vec<String>, label: &str, value: Option<&str>) {
    if let Some(v) = value {
        lines.push(format!("{}: {}", label, v));
    }
}

fn push_list(lines: &mut Vec<String>, label: &str, values: &[String]) {
    if !values.is_empty() {
        lines.push(format!("{}: {}", label, values.join(", ")));
    }
}
