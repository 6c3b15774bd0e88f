//! Built-in content models of the ministry website.

use crate::locale::Label;
use crate::model::{ContentModel, FieldDef, OrderBy, SelectOption};
use crate::status;

const SLUG_PATTERN: &str = "^[a-z0-9]+(?:-[a-z0-9]+)*$";

fn model(segment: &str, table: &str, fr: &str, en: &str, fields: Vec<FieldDef>) -> ContentModel {
    ContentModel {
        segment: segment.to_string(),
        table: table.to_string(),
        label: Label::new(fr, en),
        fields,
        list_columns: Vec::new(),
        order_by: OrderBy::desc("created_at"),
        slug_field: None,
        public: false,
    }
}

trait ModelExt {
    fn list(self, columns: &[&str]) -> Self;
    fn order(self, order_by: OrderBy) -> Self;
    fn slug(self, field: &str) -> Self;
    fn public(self) -> Self;
}

impl ModelExt for ContentModel {
    fn list(mut self, columns: &[&str]) -> Self {
        self.list_columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    fn order(mut self, order_by: OrderBy) -> Self {
        self.order_by = order_by;
        self
    }

    fn slug(mut self, field: &str) -> Self {
        self.slug_field = Some(field.to_string());
        self
    }

    fn public(mut self) -> Self {
        self.public = true;
        self
    }
}

fn slug_field() -> FieldDef {
    FieldDef::text("slug", "Identifiant URL", "URL slug")
        .required()
        .unique()
        .max_length(200)
        .pattern(SLUG_PATTERN)
}

fn display_order() -> FieldDef {
    FieldDef::number("display_order", "Ordre d'affichage", "Display order")
}

fn is_active() -> FieldDef {
    FieldDef::boolean("is_active", "Actif", "Active")
}

pub fn projects() -> ContentModel {
    model(
        "projects",
        "projects",
        "Projets",
        "Projects",
        vec![
            FieldDef::text("title", "Titre", "Title").required().max_length(250),
            slug_field(),
            FieldDef::textarea("description", "Description", "Description"),
            FieldDef::rich_text("content", "Contenu", "Content"),
            FieldDef::select("status", "Statut", "Status", status::project_status()).required(),
            FieldDef::number("budget", "Budget (FCFA)", "Budget (XOF)"),
            FieldDef::date("start_date", "Date de début", "Start date"),
            FieldDef::date("end_date", "Date de fin", "End date"),
            FieldDef::text("location", "Localisation", "Location"),
            FieldDef::text("image_url", "Image", "Image"),
            FieldDef::boolean("is_featured", "À la une", "Featured"),
            FieldDef::number("featured_order", "Ordre à la une", "Featured order"),
        ],
    )
    .list(&["title", "status", "location", "is_featured", "updated_at"])
    .slug("slug")
    .public()
}

pub fn news() -> ContentModel {
    let categories = vec![
        SelectOption::new("news", "Actualités", "News"),
        SelectOption::new("press_release", "Communiqués", "Press releases"),
        SelectOption::new("announcement", "Annonces", "Announcements"),
        SelectOption::new("interview", "Interviews", "Interviews"),
    ];
    model(
        "news",
        "news",
        "Actualités",
        "News",
        vec![
            FieldDef::text("title", "Titre", "Title").required().max_length(250),
            slug_field(),
            FieldDef::textarea("excerpt", "Résumé", "Excerpt").max_length(500),
            FieldDef::rich_text("content", "Contenu", "Content"),
            FieldDef::select("category", "Catégorie", "Category", categories),
            FieldDef::text("image_url", "Image", "Image"),
            FieldDef::boolean("is_featured", "À la une", "Featured"),
            FieldDef::date("published_at", "Date de publication", "Publication date"),
        ],
    )
    .list(&["title", "category", "is_featured", "published_at"])
    .order(OrderBy::desc("published_at"))
    .slug("slug")
    .public()
}

pub fn tenders() -> ContentModel {
    model(
        "tenders",
        "tenders",
        "Appels d'offres",
        "Tenders",
        vec![
            FieldDef::text("reference", "Référence", "Reference").required().unique().max_length(100),
            FieldDef::text("title", "Titre", "Title").required().max_length(250),
            FieldDef::textarea("description", "Description", "Description"),
            FieldDef::select("status", "Statut", "Status", status::tender_status()).required(),
            FieldDef::number("estimated_amount", "Montant estimé (FCFA)", "Estimated amount (XOF)"),
            FieldDef::date("submission_deadline", "Date limite de dépôt", "Submission deadline").required(),
            FieldDef::text("document_url", "Dossier (URL)", "Tender file (URL)"),
        ],
    )
    .list(&["reference", "title", "status", "submission_deadline"])
    .order(OrderBy::desc("submission_deadline"))
    .public()
}

pub fn events() -> ContentModel {
    let types = vec![
        SelectOption::new("conference", "Conférence", "Conference"),
        SelectOption::new("workshop", "Atelier", "Workshop"),
        SelectOption::new("ceremony", "Cérémonie", "Ceremony"),
        SelectOption::new("forum", "Forum", "Forum"),
        SelectOption::new("site_visit", "Visite de terrain", "Site visit"),
    ];
    model(
        "events",
        "events",
        "Événements",
        "Events",
        vec![
            FieldDef::text("title", "Titre", "Title").required().max_length(250),
            FieldDef::textarea("description", "Description", "Description"),
            FieldDef::date("start_date", "Date de début", "Start date").required(),
            FieldDef::date("end_date", "Date de fin", "End date"),
            FieldDef::text("location", "Lieu", "Location"),
            FieldDef::select("event_type", "Type", "Type", types),
            FieldDef::select("status", "Statut", "Status", status::event_status()),
        ],
    )
    .list(&["title", "start_date", "location", "status"])
    .order(OrderBy::desc("start_date"))
    .public()
}

pub fn publications() -> ContentModel {
    let categories = vec![
        SelectOption::new("report", "Rapport", "Report"),
        SelectOption::new("legal_text", "Texte juridique", "Legal text"),
        SelectOption::new("guide", "Guide", "Guide"),
        SelectOption::new("study", "Étude", "Study"),
    ];
    model(
        "publications",
        "publications",
        "Publications",
        "Publications",
        vec![
            FieldDef::text("title", "Titre", "Title").required().max_length(250),
            FieldDef::textarea("description", "Description", "Description"),
            FieldDef::select("category", "Catégorie", "Category", categories),
            FieldDef::text("file_url", "Fichier (URL)", "File (URL)"),
            FieldDef::date("published_at", "Date de publication", "Publication date"),
        ],
    )
    .list(&["title", "category", "published_at"])
    .order(OrderBy::desc("published_at"))
    .public()
}

pub fn careers() -> ContentModel {
    let contracts = vec![
        SelectOption::new("permanent", "CDI", "Permanent"),
        SelectOption::new("fixed_term", "CDD", "Fixed term"),
        SelectOption::new("internship", "Stage", "Internship"),
        SelectOption::new("consultancy", "Consultance", "Consultancy"),
    ];
    model(
        "careers",
        "careers",
        "Carrières",
        "Careers",
        vec![
            FieldDef::text("title", "Intitulé du poste", "Job title").required().max_length(250),
            FieldDef::text("reference", "Référence", "Reference").max_length(100),
            FieldDef::rich_text("description", "Description", "Description"),
            FieldDef::select("contract_type", "Type de contrat", "Contract type", contracts),
            FieldDef::text("location", "Lieu", "Location"),
            FieldDef::date("deadline", "Date limite", "Deadline"),
            FieldDef::select("status", "Statut", "Status", status::career_status()),
        ],
    )
    .list(&["title", "contract_type", "deadline", "status"])
    .order(OrderBy::desc("deadline"))
    .public()
}

pub fn media() -> ContentModel {
    let types = vec![
        SelectOption::new("image", "Image", "Image"),
        SelectOption::new("video", "Vidéo", "Video"),
        SelectOption::new("document", "Document", "Document"),
        SelectOption::new("audio", "Audio", "Audio"),
    ];
    model(
        "media",
        "media",
        "Médiathèque",
        "Media library",
        vec![
            FieldDef::text("title", "Titre", "Title").required().max_length(250),
            FieldDef::select("media_type", "Type de média", "Media type", types),
            FieldDef::text("url", "URL", "URL").required(),
            FieldDef::text("alt_text", "Texte alternatif", "Alt text"),
            FieldDef::textarea("description", "Description", "Description"),
        ],
    )
    .list(&["title", "media_type", "created_at"])
    .public()
}

pub fn hero_slides() -> ContentModel {
    model(
        "hero-slides",
        "hero_slides",
        "Diaporama d'accueil",
        "Home slider",
        vec![
            FieldDef::text("title", "Titre", "Title").required().max_length(200),
            FieldDef::textarea("subtitle", "Sous-titre", "Subtitle"),
            FieldDef::text("image_url", "Image", "Image").required(),
            FieldDef::text("cta_label", "Libellé du bouton", "Button label"),
            FieldDef::text("cta_url", "Lien du bouton", "Button link"),
            display_order(),
            is_active(),
        ],
    )
    .list(&["title", "display_order", "is_active"])
    .order(OrderBy::asc("display_order"))
}

pub fn statistics() -> ContentModel {
    model(
        "statistics",
        "statistics",
        "Chiffres clés",
        "Key figures",
        vec![
            FieldDef::text("label", "Libellé", "Label").required(),
            FieldDef::text("value", "Valeur", "Value").required(),
            FieldDef::text("unit", "Unité", "Unit"),
            FieldDef::text("icon", "Icône", "Icon"),
            display_order(),
            is_active(),
        ],
    )
    .list(&["label", "value", "display_order", "is_active"])
    .order(OrderBy::asc("display_order"))
}

pub fn partners() -> ContentModel {
    model(
        "partners",
        "partners",
        "Partenaires",
        "Partners",
        vec![
            FieldDef::text("name", "Nom", "Name").required(),
            FieldDef::text("logo_url", "Logo", "Logo"),
            FieldDef::text("website_url", "Site web", "Website"),
            display_order(),
            is_active(),
        ],
    )
    .list(&["name", "display_order", "is_active"])
    .order(OrderBy::asc("display_order"))
}

pub fn quick_links() -> ContentModel {
    model(
        "quick-links",
        "quick_links",
        "Accès rapides",
        "Quick links",
        vec![
            FieldDef::text("title", "Titre", "Title").required(),
            FieldDef::text("url", "Lien", "Link").required(),
            FieldDef::text("icon", "Icône", "Icon"),
            FieldDef::textarea("description", "Description", "Description"),
            display_order(),
            is_active(),
        ],
    )
    .list(&["title", "url", "display_order", "is_active"])
    .order(OrderBy::asc("display_order"))
}

pub fn site_settings() -> ContentModel {
    model(
        "site-settings",
        "site_settings",
        "Paramètres du site",
        "Site settings",
        vec![
            FieldDef::text("key", "Clé", "Key")
                .required()
                .unique()
                .pattern("^[a-z0-9_]+$"),
            FieldDef::textarea("value", "Valeur", "Value").required(),
            FieldDef::text("description", "Description", "Description"),
        ],
    )
    .list(&["key", "value", "updated_at"])
    .order(OrderBy::asc("key"))
}

/// Every model served by default, in back-office menu order.
pub fn all() -> Vec<ContentModel> {
    vec![
        projects(),
        news(),
        tenders(),
        events(),
        publications(),
        careers(),
        media(),
        hero_slides(),
        statistics(),
        partners(),
        quick_links(),
        site_settings(),
    ]
}
