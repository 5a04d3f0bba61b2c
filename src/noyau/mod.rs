//! Noyau d'évaluation (double précision)
//!
//! Organisation interne :
//! - erreurs.rs   : taxonomie des erreurs (syntaxe, fonction inconnue, domaine, arithmétique)
//! - jetons.rs    : tokenisation (×, ÷, ^, %, π, e, √, ², ³, !, |x|)
//! - rpn.rs       : shunting-yard + construction Expr
//! - expr.rs      : AST arithmétique (flottants)
//! - fonctions.rs : table fermée des fonctions + mode d'angle + Γ (Lanczos)
//! - lecture.rs   : lecture numérique de l'AST
//! - eval.rs      : pipeline complet + mode scientifique (une fonction, une valeur)

pub mod erreurs;
pub mod eval;
pub mod expr;
pub mod fonctions;
pub mod jetons;
pub mod lecture;
pub mod rpn;


#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreurs::{ErreurCalc, Resultat};
pub use eval::{applique_fonction, eval_expression};
pub use fonctions::{Fonction, ModeAngle};
