//! Per-locale page titles and descriptions.
//!
//! Lookups never fail: a locale without an entry (or with an empty one) gets
//! the English entry, and English covers every page.

use crate::i18n::Locale;
use crate::routes::PageKey;
use serde::Serialize;

/// Title and description of a page in one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetaEntry {
    pub title: &'static str,
    pub description: &'static str,
}

impl MetaEntry {
    const fn new(title: &'static str, description: &'static str) -> Self {
        Self { title, description }
    }

    fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.description.trim().is_empty()
    }
}

/// Last-resort entry, only reachable if the English table loses a page.
const SITE_FALLBACK: MetaEntry = MetaEntry::new(
    "Williams Jullin",
    "Williams Jullin, entrepreneur and founder.",
);

static META: &[(PageKey, &str, MetaEntry)] = &[
    // English (fallback, complete)
    (PageKey::Home, "en", MetaEntry::new(
        "Williams Jullin | Entrepreneur & Founder",
        "Official website of Williams Jullin, entrepreneur and founder of two platforms helping expatriates and travellers worldwide.",
    )),
    (PageKey::Story, "en", MetaEntry::new(
        "My Story | Williams Jullin",
        "The journey of Williams Jullin: from expatriate to founder of platforms serving people abroad.",
    )),
    (PageKey::Blog, "en", MetaEntry::new(
        "Blog | Williams Jullin",
        "Articles by Williams Jullin on expatriation, entrepreneurship and building international platforms.",
    )),
    (PageKey::Contact, "en", MetaEntry::new(
        "Contact | Williams Jullin",
        "Get in touch with Williams Jullin for partnerships, press, speaking or investment enquiries.",
    )),
    (PageKey::Media, "en", MetaEntry::new(
        "Media | Williams Jullin",
        "Press resources, interviews and media coverage of Williams Jullin.",
    )),
    (PageKey::Investors, "en", MetaEntry::new(
        "Investors | Williams Jullin",
        "Investor relations: vision, traction and opportunities around the platforms founded by Williams Jullin.",
    )),
    (PageKey::Post, "en", MetaEntry::new(
        "Article | Williams Jullin",
        "An article from the Williams Jullin blog.",
    )),
    // French
    (PageKey::Home, "fr", MetaEntry::new(
        "Williams Jullin | Entrepreneur & Fondateur",
        "Site officiel de Williams Jullin, entrepreneur et fondateur de deux plateformes au service des expatriés et voyageurs.",
    )),
    (PageKey::Story, "fr", MetaEntry::new(
        "Mon histoire | Williams Jullin",
        "Le parcours de Williams Jullin : d'expatrié à fondateur de plateformes pour les personnes à l'étranger.",
    )),
    (PageKey::Blog, "fr", MetaEntry::new(
        "Blog | Williams Jullin",
        "Articles de Williams Jullin sur l'expatriation, l'entrepreneuriat et les plateformes internationales.",
    )),
    (PageKey::Contact, "fr", MetaEntry::new(
        "Contact | Williams Jullin",
        "Contactez Williams Jullin pour un partenariat, la presse, une conférence ou un investissement.",
    )),
    (PageKey::Media, "fr", MetaEntry::new(
        "Médias | Williams Jullin",
        "Kit presse, interviews et retombées médiatiques de Williams Jullin.",
    )),
    (PageKey::Investors, "fr", MetaEntry::new(
        "Investisseurs | Williams Jullin",
        "Relations investisseurs : vision, traction et opportunités des plateformes fondées par Williams Jullin.",
    )),
    (PageKey::Post, "fr", MetaEntry::new(
        "Article | Williams Jullin",
        "Un article du blog de Williams Jullin.",
    )),
    // Spanish
    (PageKey::Home, "es", MetaEntry::new(
        "Williams Jullin | Emprendedor y Fundador",
        "Sitio oficial de Williams Jullin, emprendedor y fundador de dos plataformas para expatriados y viajeros.",
    )),
    (PageKey::Story, "es", MetaEntry::new(
        "Mi historia | Williams Jullin",
        "La trayectoria de Williams Jullin: de expatriado a fundador de plataformas internacionales.",
    )),
    (PageKey::Contact, "es", MetaEntry::new(
        "Contacto | Williams Jullin",
        "Contacta con Williams Jullin para colaboraciones, prensa, conferencias o inversión.",
    )),
    // German
    (PageKey::Home, "de", MetaEntry::new(
        "Williams Jullin | Unternehmer & Gründer",
        "Offizielle Website von Williams Jullin, Unternehmer und Gründer zweier Plattformen für Expats und Reisende.",
    )),
    (PageKey::Story, "de", MetaEntry::new(
        "Meine Geschichte | Williams Jullin",
        "Der Werdegang von Williams Jullin: vom Expat zum Gründer internationaler Plattformen.",
    )),
    (PageKey::Contact, "de", MetaEntry::new(
        "Kontakt | Williams Jullin",
        "Kontaktieren Sie Williams Jullin für Partnerschaften, Presse, Vorträge oder Investitionen.",
    )),
    // Portuguese
    (PageKey::Home, "pt", MetaEntry::new(
        "Williams Jullin | Empreendedor e Fundador",
        "Site oficial de Williams Jullin, empreendedor e fundador de duas plataformas para expatriados e viajantes.",
    )),
    // Russian
    (PageKey::Home, "ru", MetaEntry::new(
        "Уильямс Жюллен | Предприниматель и основатель",
        "Официальный сайт Уильямса Жюллена, предпринимателя и основателя двух платформ для экспатов и путешественников.",
    )),
    // Chinese
    (PageKey::Home, "zh", MetaEntry::new(
        "Williams Jullin | 企业家与创始人",
        "Williams Jullin 的官方网站，他是两个服务海外侨民和旅行者的平台的创始人。",
    )),
    (PageKey::Contact, "zh", MetaEntry::new(
        "联系 | Williams Jullin",
        "就合作、媒体、演讲或投资事宜联系 Williams Jullin。",
    )),
];

/// Explicit entry for a (page, locale) pair, without fallback.
pub fn explicit_meta(page: PageKey, locale: Locale) -> Option<MetaEntry> {
    META.iter()
        .find(|(p, code, entry)| *p == page && *code == locale.code() && entry.is_complete())
        .map(|(_, _, entry)| *entry)
}

/// Title and description for a page, falling back to English.
pub fn meta_for(page: PageKey, locale: Locale) -> MetaEntry {
    explicit_meta(page, locale)
        .or_else(|| explicit_meta(page, Locale::fallback()))
        .unwrap_or(SITE_FALLBACK)
}
