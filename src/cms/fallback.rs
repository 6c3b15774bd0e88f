//! Static home page content served while the corresponding tables are empty.

use super::{HeroSlide, Partner, QuickLink, Statistic};
use crate::locale::Locale;

fn pick(locale: Locale, fr: &str, en: &str) -> String {
    match locale {
        Locale::Fr => fr.to_string(),
        Locale::En => en.to_string(),
    }
}

fn slide(locale: Locale, order: f64, title: (&str, &str), subtitle: (&str, &str), image: &str, cta: (&str, &str), url: &str) -> HeroSlide {
    HeroSlide {
        id: None,
        title: pick(locale, title.0, title.1),
        subtitle: Some(pick(locale, subtitle.0, subtitle.1)),
        image_url: image.to_string(),
        cta_label: Some(pick(locale, cta.0, cta.1)),
        cta_url: Some(url.to_string()),
        display_order: Some(order),
    }
}

pub fn hero_slides(locale: Locale) -> Vec<HeroSlide> {
    vec![
        slide(
            locale,
            1.0,
            ("Bâtir des villes durables et inclusives", "Building sustainable and inclusive cities"),
            (
                "Le Ministère de l'Urbanisme accompagne l'aménagement harmonieux du territoire national.",
                "The Ministry of Urbanism supports the balanced development of the national territory.",
            ),
            "/images/hero/dakar-skyline.jpg",
            ("Découvrir nos projets", "Discover our projects"),
            "/projets",
        ),
        slide(
            locale,
            2.0,
            ("Pôles urbains de nouvelle génération", "New generation urban hubs"),
            (
                "Diamniadio, Lac Rose, Daga Kholpa : des villes nouvelles pour désengorger Dakar.",
                "Diamniadio, Lac Rose, Daga Kholpa: new towns to ease pressure on Dakar.",
            ),
            "/images/hero/diamniadio.jpg",
            ("En savoir plus", "Learn more"),
            "/projets",
        ),
        slide(
            locale,
            3.0,
            ("Appels d'offres et opportunités", "Tenders and opportunities"),
            (
                "Consultez les marchés publics en cours et soumettez vos offres.",
                "Browse open public procurement notices and submit your bids.",
            ),
            "/images/hero/chantier.jpg",
            ("Voir les appels d'offres", "View tenders"),
            "/appels-offres",
        ),
    ]
}

fn stat(locale: Locale, order: f64, label: (&str, &str), value: &str, unit: Option<&str>, icon: &str) -> Statistic {
    Statistic {
        id: None,
        label: pick(locale, label.0, label.1),
        value: value.to_string(),
        unit: unit.map(str::to_string),
        icon: Some(icon.to_string()),
        display_order: Some(order),
    }
}

pub fn statistics(locale: Locale) -> Vec<Statistic> {
    vec![
        stat(locale, 1.0, ("Projets en cours", "Ongoing projects"), "45", None, "building"),
        stat(locale, 2.0, ("Logements programmés", "Planned housing units"), "100 000", None, "home"),
        stat(locale, 3.0, ("Communes accompagnées", "Municipalities supported"), "557", None, "map"),
        stat(locale, 4.0, ("Superficie aménagée", "Developed area"), "2 500", Some("ha"), "ruler"),
    ]
}

fn partner(order: f64, name: &str, logo: &str, site: &str) -> Partner {
    Partner {
        id: None,
        name: name.to_string(),
        logo_url: Some(logo.to_string()),
        website_url: Some(site.to_string()),
        display_order: Some(order),
    }
}

pub fn partners() -> Vec<Partner> {
    vec![
        partner(1.0, "Banque mondiale", "/images/partners/banque-mondiale.png", "https://www.worldbank.org"),
        partner(2.0, "Agence Française de Développement", "/images/partners/afd.png", "https://www.afd.fr"),
        partner(3.0, "ONU-Habitat", "/images/partners/onu-habitat.png", "https://unhabitat.org"),
        partner(4.0, "Banque Africaine de Développement", "/images/partners/bad.png", "https://www.afdb.org"),
    ]
}

fn link(locale: Locale, order: f64, title: (&str, &str), url: &str, icon: &str, description: (&str, &str)) -> QuickLink {
    QuickLink {
        id: None,
        title: pick(locale, title.0, title.1),
        url: url.to_string(),
        icon: Some(icon.to_string()),
        description: Some(pick(locale, description.0, description.1)),
        display_order: Some(order),
    }
}

pub fn quick_links(locale: Locale) -> Vec<QuickLink> {
    vec![
        link(
            locale,
            1.0,
            ("Autorisation de construire", "Building permit"),
            "/services/autorisation-de-construire",
            "file-text",
            ("Démarches et pièces à fournir", "Procedure and required documents"),
        ),
        link(
            locale,
            2.0,
            ("Appels d'offres", "Tenders"),
            "/appels-offres",
            "briefcase",
            ("Marchés publics du ministère", "Ministry procurement notices"),
        ),
        link(
            locale,
            3.0,
            ("Publications", "Publications"),
            "/publications",
            "book",
            ("Rapports, textes et guides", "Reports, legal texts and guides"),
        ),
        link(
            locale,
            4.0,
            ("Recrutement", "Careers"),
            "/carrieres",
            "users",
            ("Offres d'emploi et de stage", "Job and internship offers"),
        ),
    ]
}

/// Default settings as (key, value).
pub fn site_settings(locale: Locale) -> Vec<(&'static str, &'static str)> {
    let (name, tagline) = match locale {
        Locale::Fr => (
            "Ministère de l'Urbanisme, des Collectivités territoriales et de l'Aménagement des territoires",
            "République du Sénégal - Un Peuple, Un But, Une Foi",
        ),
        Locale::En => (
            "Ministry of Urbanism, Local Authorities and Territorial Planning",
            "Republic of Senegal - One People, One Goal, One Faith",
        ),
    };
    vec![
        ("site_name", name),
        ("site_tagline", tagline),
        ("contact_email", "contact@urbanisme.gouv.sn"),
        ("contact_phone", "+221 33 889 00 00"),
        ("address", "Sphère ministérielle Ousmane Tanor Dieng, Diamniadio, Sénégal"),
    ]
}
