//! Calculatrice scientifique — noyau d'évaluation
//!
//! Évalue une expression en notation calculatrice (opérateurs unicode ×/÷,
//! exposant ^, constantes π et e, postfixes ², ³, !, barres |x|, fonctions
//! nommées) en double précision, avec un mode d'angle (degrés ou radians)
//! passé explicitement à chaque appel.
//!
//! Organisation :
//! - noyau/ : tokenisation, RPN, AST, table de fonctions, lecture numérique
//! - api    : formes requête/réponse sérialisables + catalogues statiques
//!
//! Le transport (serveur HTTP, GUI) vit hors du crate : les adaptateurs
//! appellent `eval_expression` / `applique_fonction` et mettent en forme
//! le résultat ou le message d'erreur.

pub mod api;
pub mod noyau;

// API publique minimale
pub use noyau::{applique_fonction, eval_expression, ErreurCalc, Fonction, ModeAngle, Resultat};
