//! Noyau — évaluation (pipeline réel)
//!
//! jetons -> RPN -> Expr -> lecture numérique
//!
//! Deux entrées publiques, une seule table de fonctions :
//! - eval_expression   : expression complète en notation calculatrice
//! - applique_fonction : mode scientifique (une fonction nommée, une valeur),
//!   strict sous-ensemble du pipeline (mêmes domaines, mêmes conversions
//!   d'angle — rien n'est dupliqué).
//!
//! Chaque appel est pur : (expression, mode) -> résultat. Aucun état partagé.

use tracing::debug;

use super::erreurs::{ErreurCalc, Resultat};
use super::fonctions::{appliquer, Fonction, ModeAngle};
use super::jetons::{format_jetons, tokenize};
use super::lecture::eval_nombre;
use super::rpn::{from_rpn, to_rpn};

/// Garde-fou anti-gel : borne le travail par appel (le parse est itératif,
/// la lecture récursive reste peu profonde sous cette borne).
const MAX_JETONS: usize = 4096;

/// API publique : évalue une expression et retourne un double fini,
/// ou une erreur descriptive (jamais NaN/±∞, jamais de panic).
pub fn eval_expression(expr_str: &str, mode: ModeAngle) -> Resultat<f64> {
    let s = expr_str.trim();
    if s.is_empty() {
        return Err(ErreurCalc::Syntaxe("entrée vide".into()));
    }

    // 1) Jetons
    let jetons = tokenize(s)?;
    if jetons.len() > MAX_JETONS {
        return Err(ErreurCalc::Syntaxe(format!(
            "expression trop longue ({} jetons, maximum {MAX_JETONS})",
            jetons.len()
        )));
    }
    debug!(jetons = %format_jetons(&jetons), "tokenisation");

    // 2) RPN
    let rpn = to_rpn(&jetons)?;
    debug!(rpn = %format_jetons(&rpn), "notation polonaise inversée");

    // 3) AST (Expr)
    let expr = from_rpn(&rpn)?;
    debug!(expr = %expr, "arbre construit");

    // 4) Lecture numérique (le mode d'angle ne touche que la table trig)
    let v = eval_nombre(&expr, mode)?;

    // 5) Jamais de NaN/±∞ rendu à l'appelant (défense en profondeur :
    //    les dépassements intermédiaires finissent ici).
    if !v.is_finite() {
        return Err(ErreurCalc::Arithmetique(
            "dépassement de capacité (résultat non fini)".into(),
        ));
    }

    Ok(v)
}

/// Mode scientifique : applique UNE fonction de la table fermée
/// (noms canoniques ou libellés raccourcis x², x³, 10^x, 1/x, x!, abs)
/// à une valeur, sous le même mode d'angle que le pipeline complet.
pub fn applique_fonction(valeur: f64, nom: &str, mode: ModeAngle) -> Resultat<f64> {
    let f = Fonction::depuis_nom(nom)
        .ok_or_else(|| ErreurCalc::FonctionInconnue(nom.trim().to_string()))?;

    appliquer(f, valeur, mode)
}
