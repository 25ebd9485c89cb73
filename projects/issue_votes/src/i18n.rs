//! Output strings for the two supported locales.
//!
//! Lookup is by exact language code. Unknown codes resolve to the
//! [`FALLBACK_LANGUAGE`] table, which is deliberately not the default one.

pub const DEFAULT_LANGUAGE: &str = "en";
pub const FALLBACK_LANGUAGE: &str = "es";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    En,
    Es,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Translations {
    pub locale: Locale,
    pub votes_title: &'static str,
    pub ranking_title: &'static str,
    pub ranking_header: &'static str,
    pub new_ranking_title: &'static str,
    pub new_ranking_body: &'static str,
    pub success_update: &'static str,
    pub error_prefix: &'static str,
}

static EN: Translations = Translations {
    locale: Locale::En,
    votes_title: "### 📊 Vote summary for this issue\n\n",
    ranking_title: "### 📊 Current issue ranking by votes\n\n",
    ranking_header: "| # | Issue | 👍 | 👎 | Total |\n|---|-------|----|----|-----|\n",
    new_ranking_title: "📊 Issue Vote Ranking",
    new_ranking_body: "This issue is automatically updated with the ranking of the most voted issues using 👍 and 👎 reactions.\n\n🗳 **Vote using 👍 or 👎 on this opening comment.**",
    success_update: "Ranking issue updated successfully.",
    error_prefix: "An error occurred:",
};

static ES: Translations = Translations {
    locale: Locale::Es,
    votes_title: "### 📊 Resumen de votos para este issue\n\n",
    ranking_title: "### 📊 Ranking actual de issues por votos\n\n",
    ranking_header: "| # | Issue | 👍 | 👎 | Total |\n|---|--------|----|----|------|\n",
    new_ranking_title: "📊 Ranking de votos por issue",
    new_ranking_body: "Este issue se actualiza automáticamente con el ranking de los issues más votados utilizando las reacciones 👍 y 👎.\n\n🗳 **Vota usando 👍 o 👎 en este comentario de apertura.**",
    success_update: "El issue de ranking se actualizó correctamente.",
    error_prefix: "Ocurrió un error:",
};

static TABLES: [(&str, &Translations); 2] = [("en", &EN), ("es", &ES)];

fn lookup(code: &str) -> Option<&'static Translations> {
    TABLES
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, table)| *table)
}

impl Translations {
    pub fn for_language(code: &str) -> &'static Translations {
        lookup(code)
            .or_else(|| lookup(FALLBACK_LANGUAGE))
            .unwrap_or(&ES)
    }

    pub fn ignoring(&self, issue_number: u64, label: &str) -> String {
        match self.locale {
            Locale::En => format!("Skipping issue #{issue_number} because it is labeled as \"{label}\"."),
            Locale::Es => format!("Se omite el issue #{issue_number} porque tiene la etiqueta \"{label}\"."),
        }
    }

    pub fn votes_body(&self, upvotes: u64, downvotes: u64, total: i64) -> String {
        format!("👍: {upvotes}\n\n👎: {downvotes}\n\nTotal: {total}")
    }

    pub fn success_create(&self, issue_number: u64) -> String {
        match self.locale {
            Locale::En => format!("Created new ranking issue (#{issue_number})."),
            Locale::Es => format!("Se creó el issue de ranking (#{issue_number})."),
        }
    }
}
