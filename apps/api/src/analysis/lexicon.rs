//! Read-only word tables the analyzer scores against.
//!
//! Built once at startup via [`Lexicon::builtin`] and shared through `Arc`.
//! Every table is keyed by [`Language`]; the rewrite tables and the metrics
//! pattern are language-independent.

use regex::Regex;

use crate::analysis::models::{Industry, Language};
use crate::analysis::rewrite::RewriteRule;

/// Keyword lists for each industry, in one language.
#[derive(Debug, Clone, Copy)]
pub struct IndustryKeywords {
    pub tech: &'static [&'static str],
    pub marketing: &'static [&'static str],
    pub finance: &'static [&'static str],
    pub healthcare: &'static [&'static str],
    pub sales: &'static [&'static str],
}

impl IndustryKeywords {
    pub fn get(&self, industry: Industry) -> &'static [&'static str] {
        match industry {
            Industry::Tech => self.tech,
            Industry::Marketing => self.marketing,
            Industry::Finance => self.finance,
            Industry::Healthcare => self.healthcare,
            Industry::Sales => self.sales,
        }
    }
}

/// All word lists for a single language. Entries are lowercase.
#[derive(Debug, Clone, Copy)]
pub struct LanguageTable {
    pub power_words: &'static [&'static str],
    pub weak_phrases: &'static [&'static str],
    pub industry_keywords: IndustryKeywords,
}

const ENGLISH: LanguageTable = LanguageTable {
    power_words: &[
        "achieved",
        "improved",
        "led",
        "managed",
        "developed",
        "created",
        "implemented",
        "increased",
        "reduced",
        "delivered",
        "launched",
        "optimized",
        "spearheaded",
        "streamlined",
        "designed",
    ],
    weak_phrases: &[
        "responsible for",
        "worked on",
        "helped with",
        "assisted with",
        "was involved in",
        "participated in",
        "duties included",
        "tasked with",
    ],
    industry_keywords: IndustryKeywords {
        tech: &[
            "javascript",
            "typescript",
            "python",
            "react",
            "node",
            "api",
            "cloud",
            "aws",
            "docker",
            "kubernetes",
            "microservices",
            "devops",
            "agile",
            "software",
            "database",
            "sql",
            "deployment",
            "engineer",
            "machine learning",
        ],
        marketing: &[
            "seo",
            "social media",
            "brand",
            "campaign",
            "content marketing",
            "digital marketing",
            "google analytics",
            "conversion",
            "engagement",
            "market research",
            "advertising",
            "copywriting",
        ],
        finance: &[
            "financial",
            "accounting",
            "budget",
            "forecasting",
            "investment",
            "portfolio",
            "risk management",
            "audit",
            "compliance",
            "valuation",
            "excel",
            "gaap",
        ],
        healthcare: &[
            "patient",
            "clinical",
            "medical",
            "healthcare",
            "hipaa",
            "nursing",
            "diagnosis",
            "treatment",
            "hospital",
            "pharmaceutical",
        ],
        sales: &[
            "sales",
            "revenue",
            "quota",
            "crm",
            "salesforce",
            "negotiation",
            "b2b",
            "lead generation",
            "account management",
            "client relationship",
            "cold calling",
        ],
    },
};

const SPANISH: LanguageTable = LanguageTable {
    power_words: &[
        "logré",
        "lideré",
        "dirigí",
        "gestioné",
        "desarrollé",
        "creé",
        "implementé",
        "aumenté",
        "reduje",
        "mejoré",
        "lancé",
        "optimicé",
    ],
    weak_phrases: &[
        "responsable de",
        "trabajé en",
        "ayudé con",
        "ayudé a",
        "participé en",
        "encargado de",
    ],
    industry_keywords: IndustryKeywords {
        tech: &[
            "javascript",
            "typescript",
            "python",
            "react",
            "node",
            "api",
            "nube",
            "aws",
            "docker",
            "kubernetes",
            "microservicios",
            "devops",
            "ágil",
            "software",
            "base de datos",
            "sql",
            "despliegue",
            "ingeniero",
            "desarrollador",
        ],
        marketing: &[
            "seo",
            "redes sociales",
            "marca",
            "campaña",
            "marketing de contenidos",
            "marketing digital",
            "google analytics",
            "conversión",
            "publicidad",
            "investigación de mercado",
        ],
        finance: &[
            "finanzas",
            "financiero",
            "contabilidad",
            "presupuesto",
            "previsión",
            "inversión",
            "gestión de riesgos",
            "auditoría",
            "cumplimiento normativo",
            "valoración",
            "excel",
        ],
        healthcare: &[
            "paciente",
            "clínico",
            "médico",
            "salud",
            "enfermería",
            "diagnóstico",
            "tratamiento",
            "hospital",
            "farmacéutico",
        ],
        sales: &[
            "ventas",
            "ingresos",
            "cuota",
            "crm",
            "salesforce",
            "negociación",
            "b2b",
            "generación de leads",
            "gestión de cuentas",
            "cartera de clientes",
        ],
    },
};

const FRENCH: LanguageTable = LanguageTable {
    power_words: &[
        "réalisé",
        "dirigé",
        "géré",
        "développé",
        "créé",
        "mis en œuvre",
        "augmenté",
        "réduit",
        "amélioré",
        "lancé",
        "optimisé",
        "piloté",
    ],
    weak_phrases: &[
        "responsable de",
        "travaillé sur",
        "aidé à",
        "aidé avec",
        "participé à",
        "chargé de",
    ],
    industry_keywords: IndustryKeywords {
        tech: &[
            "javascript",
            "typescript",
            "python",
            "react",
            "node",
            "api",
            "cloud",
            "aws",
            "docker",
            "kubernetes",
            "microservices",
            "devops",
            "agile",
            "logiciel",
            "base de données",
            "sql",
            "déploiement",
            "ingénieur",
            "développeur",
        ],
        marketing: &[
            "seo",
            "réseaux sociaux",
            "marque",
            "campagne",
            "marketing de contenu",
            "marketing digital",
            "google analytics",
            "conversion",
            "publicité",
            "étude de marché",
        ],
        finance: &[
            "finance",
            "financier",
            "comptabilité",
            "budget",
            "prévision",
            "investissement",
            "portefeuille",
            "gestion des risques",
            "audit",
            "conformité",
            "excel",
        ],
        healthcare: &[
            "patient",
            "clinique",
            "médical",
            "santé",
            "soins infirmiers",
            "diagnostic",
            "traitement",
            "hôpital",
            "pharmaceutique",
        ],
        sales: &[
            "ventes",
            "chiffre d'affaires",
            "quota",
            "crm",
            "salesforce",
            "négociation",
            "b2b",
            "prospection",
            "gestion de comptes",
            "relation client",
        ],
    },
};

const GERMAN: LanguageTable = LanguageTable {
    power_words: &[
        "erreicht",
        "geleitet",
        "geführt",
        "entwickelt",
        "implementiert",
        "gesteigert",
        "reduziert",
        "verbessert",
        "erstellt",
        "eingeführt",
        "optimiert",
        "aufgebaut",
    ],
    weak_phrases: &[
        "verantwortlich für",
        "zuständig für",
        "gearbeitet an",
        "geholfen bei",
        "beteiligt an",
        "mitgewirkt bei",
    ],
    industry_keywords: IndustryKeywords {
        tech: &[
            "javascript",
            "typescript",
            "python",
            "react",
            "node",
            "api",
            "cloud",
            "aws",
            "docker",
            "kubernetes",
            "microservices",
            "devops",
            "agil",
            "software",
            "datenbank",
            "sql",
            "deployment",
            "ingenieur",
            "entwickler",
        ],
        marketing: &[
            "seo",
            "soziale medien",
            "markenführung",
            "kampagne",
            "content-marketing",
            "digitales marketing",
            "google analytics",
            "conversion",
            "werbung",
            "marktforschung",
        ],
        finance: &[
            "finanzen",
            "buchhaltung",
            "budget",
            "prognose",
            "investition",
            "portfolio",
            "risikomanagement",
            "wirtschaftsprüfung",
            "compliance",
            "bewertung",
            "excel",
            "controlling",
        ],
        healthcare: &[
            "patient",
            "klinisch",
            "medizinisch",
            "gesundheitswesen",
            "pflege",
            "diagnose",
            "behandlung",
            "krankenhaus",
            "pharma",
        ],
        sales: &[
            "vertrieb",
            "umsatz",
            "verkaufsquote",
            "crm",
            "salesforce",
            "verhandlung",
            "b2b",
            "kundenakquise",
            "key account",
            "kundenbeziehung",
        ],
    },
};

/// Applied in this order to every improved text.
const GENERAL_REWRITES: &[(&str, &str)] = &[
    ("responsible for", "managed and delivered"),
    ("worked on", "developed and implemented"),
    ("helped with", "contributed to"),
    ("assisted with", "supported"),
    ("was involved in", "played a key role in"),
];

/// Applied after the general table, tech industry only.
const TECH_REWRITES: &[(&str, &str)] = &[
    ("software", "scalable software solutions"),
    ("applications", "high-performance applications"),
];

const SENIORITY_KEYWORDS: &[&str] = &[
    "led", "managed", "director", "senior", "lead", "head of", "vp", "chief",
];

const GENERIC_SKILLS: &[&str] = &[
    "Leadership",
    "Communication",
    "Problem Solving",
    "Project Management",
    "Team Collaboration",
];

const METRICS_PATTERN: &str =
    r"(?i)\d+\s*[%$]?|\d+\+|\b(?:increased|decreased|improved|reduced)\b";

/// Immutable scoring vocabulary, injected into [`crate::analysis::CvAnalyzer`]
/// and the context detectors.
#[derive(Debug)]
pub struct Lexicon {
    english: LanguageTable,
    spanish: LanguageTable,
    french: LanguageTable,
    german: LanguageTable,
    general_rewrites: Vec<RewriteRule>,
    tech_rewrites: Vec<RewriteRule>,
    seniority_keywords: &'static [&'static str],
    generic_skills: &'static [&'static str],
    metrics_pattern: Regex,
}

impl Lexicon {
    /// Compiles the built-in tables. Only fails if a pattern is malformed.
    pub fn builtin() -> Result<Self, regex::Error> {
        Ok(Self {
            english: ENGLISH,
            spanish: SPANISH,
            french: FRENCH,
            german: GERMAN,
            general_rewrites: compile_rules(GENERAL_REWRITES)?,
            tech_rewrites: compile_rules(TECH_REWRITES)?,
            seniority_keywords: SENIORITY_KEYWORDS,
            generic_skills: GENERIC_SKILLS,
            metrics_pattern: Regex::new(METRICS_PATTERN)?,
        })
    }

    pub fn table(&self, language: Language) -> &LanguageTable {
        match language {
            Language::En => &self.english,
            Language::Es => &self.spanish,
            Language::Fr => &self.french,
            Language::De => &self.german,
        }
    }

    pub fn power_words(&self, language: Language) -> &'static [&'static str] {
        self.table(language).power_words
    }

    pub fn weak_phrases(&self, language: Language) -> &'static [&'static str] {
        self.table(language).weak_phrases
    }

    pub fn industry_keywords(
        &self,
        language: Language,
        industry: Industry,
    ) -> &'static [&'static str] {
        self.table(language).industry_keywords.get(industry)
    }

    /// General rules first, then the industry-specific ones (tech only).
    pub fn rewrites_for(&self, industry: Option<Industry>) -> Vec<&RewriteRule> {
        let industry_rules: &[RewriteRule] = match industry {
            Some(Industry::Tech) => &self.tech_rewrites,
            _ => &[],
        };
        self.general_rewrites.iter().chain(industry_rules).collect()
    }

    pub fn seniority_keywords(&self) -> &'static [&'static str] {
        self.seniority_keywords
    }

    pub fn generic_skills(&self) -> &'static [&'static str] {
        self.generic_skills
    }

    /// Digits (optionally with `%`, `$` or `+`) or an explicit change verb.
    pub fn has_metrics(&self, text: &str) -> bool {
        self.metrics_pattern.is_match(text)
    }
}

fn compile_rules(
    table: &[(&'static str, &'static str)],
) -> Result<Vec<RewriteRule>, regex::Error> {
    table
        .iter()
        .map(|&(phrase, replacement)| RewriteRule::new(phrase, replacement))
        .collect()
}

/// Case-insensitive containment of any word. `haystack` must already be lowercase.
pub fn contains_any(haystack: &str, words: &[&str]) -> bool {
    words.iter().any(|w| haystack.contains(w))
}

/// How many of `words` occur at least once. `haystack` must already be lowercase.
pub fn count_present(haystack: &str, words: &[&str]) -> usize {
    words.iter().filter(|w| haystack.contains(*w)).count()
}
