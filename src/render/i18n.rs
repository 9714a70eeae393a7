//! Translation Module
//!
//! Fixed label tables for the supported card languages. Unknown codes fall
//! back to English.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    En,
    Fa,
    De,
    Es,
    Tr,
}

/// Labels rendered on the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub title: &'static str,
    pub repos: &'static str,
    pub followers: &'static str,
    pub languages: &'static str,
    pub user_not_found: &'static str,
    pub error_fetching: &'static str,
}

impl Lang {
    /// Unsupported codes fall back to English.
    pub fn from_param(value: &str) -> Self {
        match value {
            "fa" => Lang::Fa,
            "de" => Lang::De,
            "es" => Lang::Es,
            "tr" => Lang::Tr,
            _ => Lang::En,
        }
    }

    pub fn labels(self) -> &'static Labels {
        match self {
            Lang::En => &EN,
            Lang::Fa => &FA,
            Lang::De => &DE,
            Lang::Es => &ES,
            Lang::Tr => &TR,
        }
    }
}

const EN: Labels = Labels {
    title: "GitHub Stats",
    repos: "Repos",
    followers: "Followers",
    languages: "Top Languages",
    user_not_found: "User Not Found",
    error_fetching: "Error Fetching Data",
};

const FA: Labels = Labels {
    title: "آمار گیت‌هاب",
    repos: "ریپازیتوری‌ها",
    followers: "دنبال‌کنندگان",
    languages: "زبان‌های برتر",
    user_not_found: "کاربر یافت نشد",
    error_fetching: "خطا در دریافت اطلاعات",
};

const DE: Labels = Labels {
    title: "GitHub-Statistiken",
    repos: "Repos",
    followers: "Follower",
    languages: "Top-Sprachen",
    user_not_found: "Benutzer nicht gefunden",
    error_fetching: "Fehler beim Abrufen der Daten",
};

const ES: Labels = Labels {
    title: "Estadísticas de GitHub",
    repos: "Repos",
    followers: "Seguidores",
    languages: "Lenguajes Principales",
    user_not_found: "Usuario no encontrado",
    error_fetching: "Error al obtener datos",
};

const TR: Labels = Labels {
    title: "GitHub İstatistikleri",
    repos: "Repolar",
    followers: "Takipçiler",
    languages: "En Popüler Diller",
    user_not_found: "Kullanıcı Bulunamadı",
    error_fetching: "Veri Alınırken Hata Oluştu",
};
