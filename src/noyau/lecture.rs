// src/noyau/lecture.rs

use std::f64::consts;

use super::erreurs::{ErreurCalc, Resultat};
use super::expr::Expr;
use super::fonctions::{appliquer, ModeAngle};

/// Lecture numérique de l'AST (double précision).
/// - Division / modulo : diviseur nul rejeté AVANT le calcul.
/// - Puissance : powf ; un résultat NaN (base négative, exposant non entier)
///   est un dépassement de domaine, pas un nombre.
/// - Fonctions : table fermée uniquement, via fonctions::appliquer
///   (domaines + mode d'angle au même endroit pour les deux entrées).
pub fn eval_nombre(expr: &Expr, mode: ModeAngle) -> Resultat<f64> {
    use Expr::*;

    match expr {
        Num(v) => Ok(*v),
        Pi => Ok(consts::PI),
        E => Ok(consts::E),

        Appel(f, x) => appliquer(*f, eval_nombre(x, mode)?, mode),

        Add(a, b) => Ok(eval_nombre(a, mode)? + eval_nombre(b, mode)?),
        Sub(a, b) => Ok(eval_nombre(a, mode)? - eval_nombre(b, mode)?),
        Mul(a, b) => Ok(eval_nombre(a, mode)? * eval_nombre(b, mode)?),

        Div(a, b) => {
            let d = eval_nombre(b, mode)?;
            if d == 0.0 {
                return Err(ErreurCalc::Arithmetique("division par zéro".into()));
            }
            Ok(eval_nombre(a, mode)? / d)
        }

        Mod(a, b) => {
            let d = eval_nombre(b, mode)?;
            if d == 0.0 {
                return Err(ErreurCalc::Arithmetique("modulo par zéro".into()));
            }
            Ok(mod_flottant(eval_nombre(a, mode)?, d))
        }

        Pow(a, b) => {
            let base = eval_nombre(a, mode)?;
            let exp = eval_nombre(b, mode)?;
            let v = base.powf(exp);
            if v.is_nan() {
                return Err(ErreurCalc::Domaine(
                    "puissance hors domaine (base négative, exposant non entier)".into(),
                ));
            }
            Ok(v)
        }
    }
}

/// Modulo "plancher" : a - b·⌊a/b⌋, signe du diviseur.
/// (Le reste tronqué de l'opérateur natif diverge pour les opérandes négatifs.)
fn mod_flottant(a: f64, b: f64) -> f64 {
    a - b * (a / b).floor()
}
