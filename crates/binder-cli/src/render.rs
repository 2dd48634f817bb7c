//! Terminal rendering of binder contents.

use binder_schema::{
    BinderDocument, Contact, InsurancePolicy, Medication, Note, Pet, SearchHits,
};
use colored::Colorize;

fn section(title: &str, count: usize) {
    println!("{} {}", title.cyan().bold(), format!("({count})").dimmed());
}

fn detail(label: &str, value: &str) -> Option<String> {
    (!value.is_empty()).then(|| format!("{label}: {value}"))
}

fn line(id: &str, headline: String, details: Vec<Option<String>>) {
    let details: Vec<String> = details.into_iter().flatten().collect();
    if details.is_empty() {
        println!("  {} {}", headline.bold(), id.dimmed());
    } else {
        println!(
            "  {} {}  {}",
            headline.bold(),
            id.dimmed(),
            details.join(" | ")
        );
    }
}

fn contact(c: &Contact) {
    line(
        c.id.as_str(),
        c.name.clone(),
        vec![
            detail("relationship", &c.relationship),
            detail("phone", &c.phone),
            detail("notes", &c.notes),
        ],
    );
}

fn medication(m: &Medication) {
    line(
        m.id.as_str(),
        format!("{} → {}", m.person, m.medication),
        vec![detail("dosage", &m.dosage), detail("notes", &m.notes)],
    );
}

fn pet(p: &Pet) {
    line(
        p.id.as_str(),
        p.name.clone(),
        vec![
            detail("type", &p.kind),
            detail("vet", &p.vet_name),
            detail("vet phone", &p.vet_phone),
            detail("notes", &p.notes),
        ],
    );
}

fn policy(i: &InsurancePolicy) {
    line(
        i.id.as_str(),
        format!("{} ({})", i.provider, i.kind),
        vec![
            detail("policy", &i.policy_number),
            detail("phone", &i.phone),
        ],
    );
}

fn note(n: &Note) {
    println!("  {} {}", n.id.as_str().dimmed(), n.content);
}

pub fn document(doc: &BinderDocument) {
    render_hits(&doc.search(""));
    if let Some(image) = &doc.background_image {
        println!("{} {}", "Background".cyan().bold(), abbreviate(image));
    }
}

pub fn hits(query: &str, hits: &SearchHits<'_>) {
    if hits.total() == 0 {
        println!("{} no matches for `{query}`", "info:".yellow().bold());
        return;
    }
    render_hits(hits);
}

fn render_hits(hits: &SearchHits<'_>) {
    section("Contacts", hits.contacts.len());
    hits.contacts.iter().for_each(|c| contact(c));
    section("Medications", hits.medications.len());
    hits.medications.iter().for_each(|m| medication(m));
    section("Pets", hits.pets.len());
    hits.pets.iter().for_each(|p| pet(p));
    section("Insurance", hits.insurance_policies.len());
    hits.insurance_policies.iter().for_each(|i| policy(i));
    section("Notes", hits.notes.len());
    hits.notes.iter().for_each(|n| note(n));
}

/// Data URIs can be megabytes; show only their head.
fn abbreviate(image: &str) -> String {
    const MAX: usize = 60;
    match image.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}…", &image[..cut]),
        None => image.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_images_are_abbreviated() {
        let uri = format!("data:image/png;base64,{}", "A".repeat(500));
        let shown = abbreviate(&uri);
        assert_eq!(shown.chars().count(), 61);
        assert!(shown.ends_with('…'));
        assert_eq!(abbreviate("https://x.test/a.jpg"), "https://x.test/a.jpg");
    }

    #[test]
    fn empty_details_are_omitted() {
        assert_eq!(detail("phone", ""), None);
        assert_eq!(detail("phone", "555").as_deref(), Some("phone: 555"));
    }
}
