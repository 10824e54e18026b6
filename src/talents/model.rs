use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

/// Mastery levels, stored as their French wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NiveauMaitrise {
    #[serde(rename = "débutant")]
    Debutant,
    #[serde(rename = "intermédiaire")]
    Intermediaire,
    #[serde(rename = "avancé")]
    Avance,
    #[serde(rename = "expert")]
    Expert,
    #[serde(rename = "maître")]
    Maitre,
    #[serde(rename = "légendaire")]
    Legendaire,
}

impl NiveauMaitrise {
    pub fn as_str(&self) -> &'static str {
        match self {
            NiveauMaitrise::Debutant => "débutant",
            NiveauMaitrise::Intermediaire => "intermédiaire",
            NiveauMaitrise::Avance => "avancé",
            NiveauMaitrise::Expert => "expert",
            NiveauMaitrise::Maitre => "maître",
            NiveauMaitrise::Legendaire => "légendaire",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategorieTalent {
    Technique,
    Artistique,
    Physique,
    Social,
    Analytique,
    #[serde(rename = "créatif")]
    Creatif,
    Leadership,
}

impl CategorieTalent {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategorieTalent::Technique => "technique",
            CategorieTalent::Artistique => "artistique",
            CategorieTalent::Physique => "physique",
            CategorieTalent::Social => "social",
            CategorieTalent::Analytique => "analytique",
            CategorieTalent::Creatif => "créatif",
            CategorieTalent::Leadership => "leadership",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    #[default]
    Faible,
    Moyen,
    Fort,
    Destructeur,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatValeur {
    pub nom: String,
    pub valeur: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TalentStats {
    pub principale: StatValeur,
    pub secondaires: Vec<StatValeur>,
    pub taux_reussite: f64,
    pub precision: f64,
    pub rapidite: f64,
    pub impact: ImpactLevel,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TalentCost {
    pub energie: f64,
    pub fatigue: f64,
    pub ressources_requises: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TalentLimites {
    pub conditions: Vec<String>,
    pub duree_effet: Option<String>,
    pub cooldown: Option<String>,
    pub frequence_max: Option<String>,
    pub risque_echec: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TalentEvolution {
    pub niveau_suivant: Option<String>,
    pub conditions_amelioration: Vec<String>,
    pub capacites_debloquables: Vec<String>,
    pub xp_necessaire: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TalentHistorique {
    pub acquisition: String,
    pub mentor: Option<String>,
    pub formation: Option<String>,
    pub evenement_declencheur: Option<String>,
    pub evolution_temps: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TalentSynergie {
    pub talents_compatibles: Vec<String>,
    pub bonus_equipe: Vec<String>,
    pub situations_excellence: Vec<String>,
    pub combos: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TalentFaiblesses {
    pub contre_indications: Vec<String>,
    pub talents_neutralisants: Vec<String>,
    pub defauts_naturels: Vec<String>,
    pub cout_eleve: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TalentStyle {
    pub signature: Option<String>,
    pub surnom: Option<String>,
    pub citation: Option<String>,
    pub effets_visuels: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TalentSocial {
    pub apprecie_par: Vec<String>,
    pub redoute_par: Vec<String>,
    pub influence_groupe: String,
    pub compatibilites_profils: Vec<String>,
}

/// One row of the talent directory. The structured sub-objects live in JSONB
/// columns, the free-text lists in TEXT[] columns.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TalentEntity {
    pub id: Uuid,

    pub nom: String,
    pub age: Option<i32>,
    pub genre: Option<String>,
    pub origine: Option<String>,
    pub nationalite: Option<String>,
    pub ville: Option<String>,
    pub promo: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub avatar_initials: Option<String>,
    pub avatar_color: Option<String>,

    pub role: String,
    pub niveau: String,
    pub categorie: String,
    pub bio: Option<String>,
    pub specificites: Vec<String>,
    pub domaines_application: Vec<String>,

    pub stats: Json<TalentStats>,
    pub cout: Json<TalentCost>,
    pub limites: Json<TalentLimites>,

    pub competences: Vec<String>,
    pub forces_principales: Vec<String>,
    pub bonus_passifs: Vec<String>,
    pub effets_speciaux: Vec<String>,
    pub synergies: Json<TalentSynergie>,

    pub faiblesses: Json<TalentFaiblesses>,
    pub historique: Json<TalentHistorique>,

    pub exemples_utilisation: Vec<String>,
    pub cas_reels: Vec<String>,

    pub evolution: Json<TalentEvolution>,
    pub xp_actuel: i32,

    pub materiel_requis: Vec<String>,
    pub environnement_ideal: Vec<String>,
    pub competences_complementaires: Vec<String>,

    pub style: Json<TalentStyle>,
    pub social: Json<TalentSocial>,

    pub langues: Vec<String>,
    pub passions: Vec<String>,
    pub projets: Vec<String>,
    pub tags: Vec<String>,
    pub verified: bool,
    pub created_at: DateTime<Utc>,

    pub user_id: Option<Uuid>,
}

/// Creation payload. Only identity and the role/level/category triple are
/// mandatory, everything else falls back to empty defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTalent {
    pub nom: String,
    pub role: String,
    pub niveau: NiveauMaitrise,
    pub categorie: CategorieTalent,

    pub age: Option<i32>,
    pub genre: Option<String>,
    pub origine: Option<String>,
    pub nationalite: Option<String>,
    pub ville: Option<String>,
    pub promo: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub avatar_initials: Option<String>,
    pub avatar_color: Option<String>,
    pub bio: Option<String>,

    #[serde(default)]
    pub specificites: Vec<String>,
    #[serde(default)]
    pub domaines_application: Vec<String>,
    #[serde(default)]
    pub stats: TalentStats,
    #[serde(default)]
    pub cout: TalentCost,
    #[serde(default)]
    pub limites: TalentLimites,
    #[serde(default)]
    pub competences: Vec<String>,
    #[serde(default)]
    pub forces_principales: Vec<String>,
    #[serde(default)]
    pub bonus_passifs: Vec<String>,
    #[serde(default)]
    pub effets_speciaux: Vec<String>,
    #[serde(default)]
    pub synergies: TalentSynergie,
    #[serde(default)]
    pub faiblesses: TalentFaiblesses,
    #[serde(default)]
    pub historique: TalentHistorique,
    #[serde(default)]
    pub exemples_utilisation: Vec<String>,
    #[serde(default)]
    pub cas_reels: Vec<String>,
    #[serde(default)]
    pub evolution: TalentEvolution,
    pub xp_actuel: Option<i32>,
    #[serde(default)]
    pub materiel_requis: Vec<String>,
    #[serde(default)]
    pub environnement_ideal: Vec<String>,
    #[serde(default)]
    pub competences_complementaires: Vec<String>,
    #[serde(default)]
    pub style: TalentStyle,
    #[serde(default)]
    pub social: TalentSocial,
    #[serde(default)]
    pub langues: Vec<String>,
    #[serde(default)]
    pub passions: Vec<String>,
    #[serde(default)]
    pub projets: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub verified: Option<bool>,
    pub user_id: Option<Uuid>,
}

/// Sparse update, same absent-vs-null contract as the profile patch.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TalentPatch {
    pub nom: Option<String>,
    pub role: Option<String>,
    pub niveau: Option<NiveauMaitrise>,
    pub categorie: Option<CategorieTalent>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub age: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub genre: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub origine: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub nationalite: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub ville: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub promo: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub avatar_url: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub avatar_initials: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub avatar_color: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub bio: Option<Option<String>>,

    pub specificites: Option<Vec<String>>,
    pub domaines_application: Option<Vec<String>>,
    pub stats: Option<TalentStats>,
    pub cout: Option<TalentCost>,
    pub limites: Option<TalentLimites>,
    pub competences: Option<Vec<String>>,
    pub forces_principales: Option<Vec<String>>,
    pub bonus_passifs: Option<Vec<String>>,
    pub effets_speciaux: Option<Vec<String>>,
    pub synergies: Option<TalentSynergie>,
    pub faiblesses: Option<TalentFaiblesses>,
    pub historique: Option<TalentHistorique>,
    pub exemples_utilisation: Option<Vec<String>>,
    pub cas_reels: Option<Vec<String>>,
    pub evolution: Option<TalentEvolution>,
    pub xp_actuel: Option<i32>,
    pub materiel_requis: Option<Vec<String>>,
    pub environnement_ideal: Option<Vec<String>>,
    pub competences_complementaires: Option<Vec<String>>,
    pub style: Option<TalentStyle>,
    pub social: Option<TalentSocial>,
    pub langues: Option<Vec<String>>,
    pub passions: Option<Vec<String>>,
    pub projets: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub verified: Option<bool>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub user_id: Option<Option<Uuid>>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn niveau_round_trips_through_french_wire_values() {
        let parsed: NiveauMaitrise = serde_json::from_str("\"légendaire\"").unwrap();
        assert_eq!(parsed, NiveauMaitrise::Legendaire);
        assert_eq!(parsed.as_str(), "légendaire");
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"légendaire\"");
    }

    #[test]
    fn minimal_create_payload_gets_empty_defaults() {
        let talent: NewTalent = serde_json::from_str(
            r#"{"nom": "Alix", "role": "Forgeronne", "niveau": "expert", "categorie": "technique"}"#,
        )
        .unwrap();
        assert!(talent.competences.is_empty());
        assert_eq!(talent.stats.impact, ImpactLevel::Faible);
        assert!(talent.verified.is_none());
    }

    #[test]
    fn patch_keeps_absent_null_distinction() {
        let patch: TalentPatch = serde_json::from_str(r#"{"bio": null, "niveau": "maître"}"#).unwrap();
        assert_eq!(patch.bio, Some(None));
        assert_eq!(patch.niveau, Some(NiveauMaitrise::Maitre));
        assert!(patch.nom.is_none());
    }
}
