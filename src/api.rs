// src/api.rs
//
// Formes requête/réponse de l'interface conceptuelle + catalogues statiques.
// -----------------------------------------------------------
// Le transport (HTTP/JSON ou autre) vit hors du crate : ici uniquement les
// formes sérialisables, compatibles champ à champ avec la liaison d'origine
// (expression / trig_mode / value / function / result / detail), et leur
// traitement par le noyau.
//
// Le mode d'angle est un champ de requête, jamais un état du processus :
// deux requêtes concurrentes avec des modes différents ne s'influencent pas.

use serde::{Deserialize, Serialize};

use crate::noyau::{applique_fonction, eval_expression, ErreurCalc, ModeAngle};

/* ------------------------ Requêtes / réponses ------------------------ */

#[derive(Clone, Debug, Deserialize)]
pub struct RequeteCalcul {
    pub expression: String,
    #[serde(default, rename = "trig_mode")]
    pub mode_angle: ModeAngle,
}

#[derive(Clone, Debug, Serialize)]
pub struct ReponseCalcul {
    #[serde(rename = "result")]
    pub resultat: f64,
    pub expression: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RequeteScientifique {
    #[serde(rename = "value")]
    pub valeur: f64,
    #[serde(rename = "function")]
    pub fonction: String,
    #[serde(default, rename = "trig_mode")]
    pub mode_angle: ModeAngle,
}

#[derive(Clone, Debug, Serialize)]
pub struct ReponseScientifique {
    #[serde(rename = "function")]
    pub fonction: String,
    #[serde(rename = "input")]
    pub entree: f64,
    #[serde(rename = "result")]
    pub resultat: f64,
    #[serde(rename = "trig_mode")]
    pub mode_angle: ModeAngle,
}

/// Corps d'erreur de la liaison d'origine : { "detail": … }.
/// Le message est affiché tel quel à l'utilisateur final.
#[derive(Clone, Debug, Serialize)]
pub struct ReponseErreur {
    pub detail: String,
}

impl ReponseErreur {
    pub fn depuis(err: &ErreurCalc) -> Self {
        Self {
            detail: err.to_string(),
        }
    }
}

/* ------------------------ Traitement ------------------------ */

/// Évalue une expression complète. L'adaptateur mappe Err sur 400
/// (faute de l'appelant) ou 500 via ErreurCalc::est_faute_appelant.
pub fn traiter_calcul(req: &RequeteCalcul) -> Result<ReponseCalcul, ErreurCalc> {
    let resultat = eval_expression(&req.expression, req.mode_angle)?;
    Ok(ReponseCalcul {
        resultat,
        expression: req.expression.clone(),
    })
}

/// Applique une fonction scientifique à une valeur unique.
pub fn traiter_scientifique(
    req: &RequeteScientifique,
) -> Result<ReponseScientifique, ErreurCalc> {
    let resultat = applique_fonction(req.valeur, &req.fonction, req.mode_angle)?;
    Ok(ReponseScientifique {
        fonction: req.fonction.clone(),
        entree: req.valeur,
        resultat,
        mode_angle: req.mode_angle,
    })
}

/* ------------------------ Catalogues statiques (aucun calcul) ------------------------ */

#[derive(Clone, Debug, Serialize)]
pub struct CatalogueOperations {
    #[serde(rename = "basic")]
    pub basiques: &'static [&'static str],
    #[serde(rename = "scientific")]
    pub scientifiques: &'static [&'static str],
    #[serde(rename = "constants")]
    pub constantes: &'static [&'static str],
    #[serde(rename = "parentheses")]
    pub parentheses: &'static [&'static str],
}

/// Opérations supportées (métadonnées figées, table en lecture seule).
pub fn liste_operations() -> CatalogueOperations {
    CatalogueOperations {
        basiques: &["+", "-", "*", "/", "%", "^"],
        scientifiques: &[
            "sin", "cos", "tan", "asin", "acos", "atan", "log", "ln", "sqrt", "factorial",
            "gamma", "x²", "x³", "10^x", "1/x", "x!", "abs",
        ],
        constantes: &["π", "e"],
        parentheses: &["(", ")"],
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct DescriptionConstantes {
    pub pi: &'static str,
    pub e: &'static str,
}

#[derive(Clone, Debug, Serialize)]
pub struct CatalogueConstantes {
    pub pi: f64,
    pub e: f64,
    pub description: DescriptionConstantes,
}

/// Constantes mathématiques (métadonnées figées).
pub fn liste_constantes() -> CatalogueConstantes {
    CatalogueConstantes {
        pi: std::f64::consts::PI,
        e: std::f64::consts::E,
        description: DescriptionConstantes {
            pi: "nombre π (rapport de la circonférence d'un cercle à son diamètre)",
            e: "nombre d'Euler (base du logarithme naturel)",
        },
    }
}
