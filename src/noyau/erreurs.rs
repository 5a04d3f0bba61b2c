// src/noyau/erreurs.rs
//
// Taxonomie des erreurs d'évaluation.
// - Syntaxe          : l'expression ne passe pas la grammaire
// - FonctionInconnue : identifiant hors de la table fermée
// - Domaine          : entrée hors du domaine d'une fonction (asin(2), log(-1)…)
// - Arithmetique     : division/modulo par zéro, dépassement de capacité
// - Interne          : bug du noyau remonté proprement (jamais un panic)
//
// Les messages sont destinés à l'utilisateur final : l'appelant les affiche
// tels quels. Aucun résultat numérique partiel n'accompagne une erreur.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurCalc {
    #[error("syntaxe invalide : {0}")]
    Syntaxe(String),

    #[error("fonction inconnue : {0}")]
    FonctionInconnue(String),

    #[error("hors domaine : {0}")]
    Domaine(String),

    #[error("erreur arithmétique : {0}")]
    Arithmetique(String),

    #[error("erreur interne : {0}")]
    Interne(String),
}

impl ErreurCalc {
    /// Faute de l'appelant (entrée invalide) ou bug du noyau ?
    /// Dans la liaison HTTP d'origine : 400 contre 500.
    pub fn est_faute_appelant(&self) -> bool {
        !matches!(self, ErreurCalc::Interne(_))
    }
}

pub type Resultat<T> = Result<T, ErreurCalc>;
