use chrono::Utc;
use sqlx::{Pool, Postgres, QueryBuilder};
use sqlx::types::Json;
use uuid::Uuid;
use crate::talents::model::{NewTalent, TalentEntity, TalentPatch};

#[derive(Debug, Clone)]
pub struct TalentDatabase {
    pool: Pool<Postgres>,
}

impl TalentDatabase {

    pub fn with_pool(pool: Pool<Postgres>) -> Self {
        TalentDatabase { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<TalentEntity>, sqlx::Error> {
        let talents = sqlx::query_as::<_, TalentEntity>("SELECT * FROM talents ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(talents)
    }

    pub async fn find_by_id(&self, talent_id: &Uuid) -> Result<Option<TalentEntity>, sqlx::Error> {
        let talent = sqlx::query_as::<_, TalentEntity>("SELECT * FROM talents WHERE id = $1")
            .bind(talent_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(talent)
    }

    pub async fn insert_talent(&self, new_talent: NewTalent) -> Result<TalentEntity, sqlx::Error> {
        let talent = sqlx::query_as::<_, TalentEntity>(
            r#"
            INSERT INTO talents (
                id, nom, age, genre, origine, nationalite, ville, promo, email,
                avatar_url, avatar_initials, avatar_color,
                role, niveau, categorie, bio, specificites, domaines_application,
                stats, cout, limites,
                competences, forces_principales, bonus_passifs, effets_speciaux, synergies,
                faiblesses, historique, exemples_utilisation, cas_reels,
                evolution, xp_actuel,
                materiel_requis, environnement_ideal, competences_complementaires,
                style, social, langues, passions, projets, tags,
                verified, user_id, created_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9,
                $10, $11, $12,
                $13, $14, $15, $16, $17, $18,
                $19, $20, $21,
                $22, $23, $24, $25, $26,
                $27, $28, $29, $30,
                $31, $32,
                $33, $34, $35,
                $36, $37, $38, $39, $40, $41,
                $42, $43, $44
            )
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_talent.nom)
        .bind(new_talent.age)
        .bind(&new_talent.genre)
        .bind(&new_talent.origine)
        .bind(&new_talent.nationalite)
        .bind(&new_talent.ville)
        .bind(&new_talent.promo)
        .bind(&new_talent.email)
        .bind(&new_talent.avatar_url)
        .bind(&new_talent.avatar_initials)
        .bind(&new_talent.avatar_color)
        .bind(&new_talent.role)
        .bind(new_talent.niveau.as_str())
        .bind(new_talent.categorie.as_str())
        .bind(&new_talent.bio)
        .bind(&new_talent.specificites)
        .bind(&new_talent.domaines_application)
        .bind(Json(&new_talent.stats))
        .bind(Json(&new_talent.cout))
        .bind(Json(&new_talent.limites))
        .bind(&new_talent.competences)
        .bind(&new_talent.forces_principales)
        .bind(&new_talent.bonus_passifs)
        .bind(&new_talent.effets_speciaux)
        .bind(Json(&new_talent.synergies))
        .bind(Json(&new_talent.faiblesses))
        .bind(Json(&new_talent.historique))
        .bind(&new_talent.exemples_utilisation)
        .bind(&new_talent.cas_reels)
        .bind(Json(&new_talent.evolution))
        .bind(new_talent.xp_actuel.unwrap_or(0))
        .bind(&new_talent.materiel_requis)
        .bind(&new_talent.environnement_ideal)
        .bind(&new_talent.competences_complementaires)
        .bind(Json(&new_talent.style))
        .bind(Json(&new_talent.social))
        .bind(&new_talent.langues)
        .bind(&new_talent.passions)
        .bind(&new_talent.projets)
        .bind(&new_talent.tags)
        .bind(new_talent.verified.unwrap_or(false))
        .bind(new_talent.user_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(talent)
    }

    /// Sparse update built column by column from the patch.
    pub async fn update_talent(&self, talent_id: &Uuid, patch: &TalentPatch) -> Result<Option<TalentEntity>, sqlx::Error> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE talents SET ");
        let mut fields = builder.separated(", ");
        let mut touched = false;

        macro_rules! set_field {
            ($column:literal, $value:expr) => {
                if let Some(value) = $value {
                    fields.push(concat!($column, " = ")).push_bind_unseparated(value);
                    touched = true;
                }
            };
        }

        set_field!("nom", patch.nom.clone());
        set_field!("role", patch.role.clone());
        set_field!("niveau", patch.niveau.map(|n| n.as_str()));
        set_field!("categorie", patch.categorie.map(|c| c.as_str()));
        set_field!("age", patch.age);
        set_field!("genre", patch.genre.clone());
        set_field!("origine", patch.origine.clone());
        set_field!("nationalite", patch.nationalite.clone());
        set_field!("ville", patch.ville.clone());
        set_field!("promo", patch.promo.clone());
        set_field!("email", patch.email.clone());
        set_field!("avatar_url", patch.avatar_url.clone());
        set_field!("avatar_initials", patch.avatar_initials.clone());
        set_field!("avatar_color", patch.avatar_color.clone());
        set_field!("bio", patch.bio.clone());
        set_field!("specificites", patch.specificites.clone());
        set_field!("domaines_application", patch.domaines_application.clone());
        set_field!("stats", patch.stats.clone().map(Json));
        set_field!("cout", patch.cout.clone().map(Json));
        set_field!("limites", patch.limites.clone().map(Json));
        set_field!("competences", patch.competences.clone());
        set_field!("forces_principales", patch.forces_principales.clone());
        set_field!("bonus_passifs", patch.bonus_passifs.clone());
        set_field!("effets_speciaux", patch.effets_speciaux.clone());
        set_field!("synergies", patch.synergies.clone().map(Json));
        set_field!("faiblesses", patch.faiblesses.clone().map(Json));
        set_field!("historique", patch.historique.clone().map(Json));
        set_field!("exemples_utilisation", patch.exemples_utilisation.clone());
        set_field!("cas_reels", patch.cas_reels.clone());
        set_field!("evolution", patch.evolution.clone().map(Json));
        set_field!("xp_actuel", patch.xp_actuel);
        set_field!("materiel_requis", patch.materiel_requis.clone());
        set_field!("environnement_ideal", patch.environnement_ideal.clone());
        set_field!("competences_complementaires", patch.competences_complementaires.clone());
        set_field!("style", patch.style.clone().map(Json));
        set_field!("social", patch.social.clone().map(Json));
        set_field!("langues", patch.langues.clone());
        set_field!("passions", patch.passions.clone());
        set_field!("projets", patch.projets.clone());
        set_field!("tags", patch.tags.clone());
        set_field!("verified", patch.verified);
        set_field!("user_id", patch.user_id);

        if !touched {
            return self.find_by_id(talent_id).await;
        }

        builder.push(" WHERE id = ").push_bind(talent_id).push(" RETURNING *");
        let talent = builder.build_query_as::<TalentEntity>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(talent)
    }

    pub async fn delete_talent(&self, talent_id: &Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM talents WHERE id = $1")
            .bind(talent_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Substring search across nom/role/bio/ville.
    pub async fn search(&self, term: &str) -> Result<Vec<TalentEntity>, sqlx::Error> {
        let pattern = format!("%{}%", term);
        let talents = sqlx::query_as::<_, TalentEntity>(
            r#"
            SELECT * FROM talents
            WHERE nom ILIKE $1 OR role ILIKE $1 OR bio ILIKE $1 OR ville ILIKE $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(talents)
    }

    pub async fn find_by_categorie(&self, categorie: &str) -> Result<Vec<TalentEntity>, sqlx::Error> {
        let talents = sqlx::query_as::<_, TalentEntity>(
            "SELECT * FROM talents WHERE categorie = $1 ORDER BY created_at DESC",
        )
        .bind(categorie)
        .fetch_all(&self.pool)
        .await?;
        Ok(talents)
    }

    pub async fn find_by_niveau(&self, niveau: &str) -> Result<Vec<TalentEntity>, sqlx::Error> {
        let talents = sqlx::query_as::<_, TalentEntity>(
            "SELECT * FROM talents WHERE niveau = $1 ORDER BY created_at DESC",
        )
        .bind(niveau)
        .fetch_all(&self.pool)
        .await?;
        Ok(talents)
    }

    pub async fn set_verified(&self, talent_id: &Uuid, verified: bool) -> Result<Option<TalentEntity>, sqlx::Error> {
        let talent = sqlx::query_as::<_, TalentEntity>(
            "UPDATE talents SET verified = $1 WHERE id = $2 RETURNING *",
        )
        .bind(verified)
        .bind(talent_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(talent)
    }

    pub async fn name_of(&self, talent_id: &Uuid) -> Result<Option<String>, sqlx::Error> {
        let name: Option<String> = sqlx::query_scalar("SELECT nom FROM talents WHERE id = $1")
            .bind(talent_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(name)
    }
}
