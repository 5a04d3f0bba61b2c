// src/noyau/fonctions.rs
//
// Table FERMÉE des fonctions scientifiques + mode d'angle.
// -----------------------------------------------------------
// - Seule Fonction::depuis_nom donne accès à une fonction : aucun autre
//   mécanisme de résolution d'identifiant n'existe dans le noyau.
// - Les contrôles de domaine précèdent le calcul (asin/acos, log/ln, √, !).
// - Trig : en mode degrés, sin/cos/tan convertissent leur argument en
//   radians avant le calcul natif ; asin/acos/atan convertissent leur
//   résultat natif (radians) en degrés. En mode radians, aucune conversion.
// - Γ : approximation de Lanczos (g=7), réflexion pour x < 1/2.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::erreurs::{ErreurCalc, Resultat};

/// Mode d'angle, paramètre de requête (jamais un état global).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModeAngle {
    #[default]
    #[serde(rename = "DEG")]
    Degres,
    #[serde(rename = "RAD")]
    Radians,
}

impl ModeAngle {
    /// Argument trig : degrés -> radians si nécessaire.
    fn en_radians(self, x: f64) -> f64 {
        match self {
            ModeAngle::Degres => x.to_radians(),
            ModeAngle::Radians => x,
        }
    }

    /// Résultat trig inverse : radians -> degrés si nécessaire.
    fn depuis_radians(self, x: f64) -> f64 {
        match self {
            ModeAngle::Degres => x.to_degrees(),
            ModeAngle::Radians => x,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Log, // base 10
    Ln,
    Sqrt,
    Abs,
    Factorielle,
    Gamma,

    // Raccourcis calculatrice (boutons du mode scientifique + postfixes ² ³)
    Carre,
    Cube,
    DixPuissance, // 10^x
    Inverse,      // 1/x
}

impl Fonction {
    /// Résolution STRICTE dans la table fermée.
    /// Accepte les noms canoniques et les libellés raccourcis du mode
    /// scientifique (x², x³, 10^x, 1/x, x!, |x|). Tout le reste : None.
    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        use Fonction::*;

        Some(match nom.trim().to_lowercase().as_str() {
            "sin" => Sin,
            "cos" => Cos,
            "tan" => Tan,
            "asin" => Asin,
            "acos" => Acos,
            "atan" => Atan,
            "log" => Log,
            "ln" => Ln,
            "sqrt" => Sqrt,
            "abs" | "|x|" => Abs,
            "factorial" | "x!" => Factorielle,
            "gamma" => Gamma,

            "x²" => Carre,
            "x³" => Cube,
            "10^x" => DixPuissance,
            "1/x" => Inverse,

            _ => return None,
        })
    }

    /// Nom canonique (messages d'erreur, traces).
    pub fn nom(&self) -> &'static str {
        use Fonction::*;
        match self {
            Sin => "sin",
            Cos => "cos",
            Tan => "tan",
            Asin => "asin",
            Acos => "acos",
            Atan => "atan",
            Log => "log",
            Ln => "ln",
            Sqrt => "sqrt",
            Abs => "abs",
            Factorielle => "factorial",
            Gamma => "gamma",
            Carre => "x²",
            Cube => "x³",
            DixPuissance => "10^x",
            Inverse => "1/x",
        }
    }
}

/// Applique une fonction de la table à une valeur.
///
/// Unique implémentation partagée par l'évaluation d'expressions et le mode
/// scientifique : domaines et conversions d'angle identiques des deux côtés.
pub fn appliquer(f: Fonction, x: f64, mode: ModeAngle) -> Resultat<f64> {
    use Fonction::*;

    let v = match f {
        Sin => mode.en_radians(x).sin(),
        Cos => mode.en_radians(x).cos(),
        Tan => mode.en_radians(x).tan(),

        Asin => {
            if !(-1.0..=1.0).contains(&x) {
                return Err(ErreurCalc::Domaine(
                    "asin exige une valeur entre -1 et 1".into(),
                ));
            }
            mode.depuis_radians(x.asin())
        }
        Acos => {
            if !(-1.0..=1.0).contains(&x) {
                return Err(ErreurCalc::Domaine(
                    "acos exige une valeur entre -1 et 1".into(),
                ));
            }
            mode.depuis_radians(x.acos())
        }
        Atan => mode.depuis_radians(x.atan()),

        Log => {
            if x <= 0.0 {
                return Err(ErreurCalc::Domaine(
                    "log exige une valeur strictement positive".into(),
                ));
            }
            x.log10()
        }
        Ln => {
            if x <= 0.0 {
                return Err(ErreurCalc::Domaine(
                    "ln exige une valeur strictement positive".into(),
                ));
            }
            x.ln()
        }
        Sqrt => {
            if x < 0.0 {
                return Err(ErreurCalc::Domaine(
                    "sqrt exige une valeur positive ou nulle".into(),
                ));
            }
            x.sqrt()
        }

        Abs => x.abs(),

        Factorielle => factorielle(x)?,
        Gamma => gamma(x)?,

        Carre => x * x,
        Cube => x * x * x,
        DixPuissance => 10f64.powf(x),
        Inverse => {
            if x == 0.0 {
                return Err(ErreurCalc::Arithmetique("division par zéro".into()));
            }
            1.0 / x
        }
    };

    // Jamais de NaN/±∞ rendu à l'appelant.
    if !v.is_finite() {
        return Err(ErreurCalc::Arithmetique(format!(
            "dépassement de capacité : {}({x})",
            f.nom()
        )));
    }

    Ok(v)
}

/* ------------------------ Factorielle ------------------------ */

/// Entier naturel : produit exact (170! est le plafond en double précision).
/// Non entier : prolongement analytique, x! = Γ(x+1).
fn factorielle(x: f64) -> Resultat<f64> {
    if x < 0.0 {
        return Err(ErreurCalc::Domaine(
            "la factorielle exige une valeur positive ou nulle".into(),
        ));
    }

    if x.fract() == 0.0 {
        if x > 170.0 {
            return Err(ErreurCalc::Arithmetique(
                "factorielle : dépassement de capacité au-delà de 170!".into(),
            ));
        }
        let n = x as u64;
        let mut acc = 1.0f64;
        for k in 2..=n {
            acc *= k as f64;
        }
        return Ok(acc);
    }

    gamma(x + 1.0)
}

/* ------------------------ Γ (Lanczos) ------------------------ */

/// Γ a des pôles en 0, -1, -2, … : rejet avant calcul.
fn gamma(x: f64) -> Resultat<f64> {
    if x <= 0.0 && x.fract() == 0.0 {
        return Err(ErreurCalc::Domaine(
            "gamma n'est pas définie pour zéro ni les entiers négatifs".into(),
        ));
    }
    Ok(gamma_lanczos(x))
}

const LANCZOS_G: f64 = 7.0;

const LANCZOS_COEFFS: [f64; 9] = [
    0.999_999_999_999_809_93,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_13,
    -176.615_029_162_140_59,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_571_6e-6,
    1.505_632_735_149_311_6e-7,
];

/// Approximation de Lanczos (g=7, 9 coefficients).
/// Réflexion pour x < 1/2 : Γ(x)·Γ(1-x) = π / sin(πx).
fn gamma_lanczos(x: f64) -> f64 {
    if x < 0.5 {
        return PI / ((PI * x).sin() * gamma_lanczos(1.0 - x));
    }

    let z = x - 1.0;
    let mut acc = LANCZOS_COEFFS[0];
    for (k, c) in LANCZOS_COEFFS.iter().enumerate().skip(1) {
        acc += c / (z + k as f64);
    }

    let t = z + LANCZOS_G + 0.5;
    (2.0 * PI).sqrt() * t.powf(z + 0.5) * (-t).exp() * acc
}
