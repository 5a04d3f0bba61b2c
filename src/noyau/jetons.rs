// src/noyau/jetons.rs

use super::erreurs::{ErreurCalc, Resultat};

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Pi,
    E,

    // Fonctions nommées (sin/cos/…) — le parse (RPN->Expr) vérifie la table fermée.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret, // ^

    // Jamais émis par le lexeur : produit par le parse quand un '-' arrive
    // en position préfixe (reconstruit en 0 - x).
    MoinsUnaire,

    // Postfixes calculatrice (règles de lexeur explicites, pas de réécriture regex)
    Fact,  // !
    Carre, // ²
    Cube,  // ³

    // Barre de valeur absolue : |x|. Ouvrante ou fermante selon le contexte,
    // c'est le parse qui apparie (supporte l'imbrication).
    Barre,

    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 3.5)
/// - opérateurs + - * / % ^ ainsi que × (multiplication) et ÷ (division)
/// - parenthèses ( )
/// - π ou pi, e (constante d'Euler)
/// - √ (équivaut à ident("sqrt"))
/// - postfixes ² ³ ! et barres | |
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
pub fn tokenize(s: &str) -> Resultat<Vec<Tok>> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Parenthèses
        if c == '(' {
            out.push(Tok::LPar);
            i += 1;
            continue;
        }
        if c == ')' {
            out.push(Tok::RPar);
            i += 1;
            continue;
        }

        // Opérateurs (× et ÷ sont les formes calculatrice de * et /)
        match c {
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '*' | '×' => {
                out.push(Tok::Star);
                i += 1;
                continue;
            }
            '/' | '÷' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            '%' => {
                out.push(Tok::Percent);
                i += 1;
                continue;
            }
            '^' => {
                out.push(Tok::Caret);
                i += 1;
                continue;
            }
            '!' => {
                out.push(Tok::Fact);
                i += 1;
                continue;
            }
            '²' => {
                out.push(Tok::Carre);
                i += 1;
                continue;
            }
            '³' => {
                out.push(Tok::Cube);
                i += 1;
                continue;
            }
            '|' => {
                out.push(Tok::Barre);
                i += 1;
                continue;
            }
            _ => {}
        }

        // π : "π" (la forme "pi"/"PI" passe par le chemin identifiant)
        if c == 'π' {
            out.push(Tok::Pi);
            i += 1;
            continue;
        }

        // Racine carrée unicode : √  => ident("sqrt")
        if c == '√' {
            out.push(Tok::Ident("sqrt".to_string()));
            i += 1;
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let w = word.to_lowercase();

            // Constantes nommées : pi et e. Tout le reste est une fonction
            // candidate — la table fermée tranche au parse.
            match w.as_str() {
                "pi" => out.push(Tok::Pi),
                "e" => out.push(Tok::E),
                _ => out.push(Tok::Ident(w)),
            }
            continue;
        }

        // Nombre décimal : chiffres, puis éventuellement '.' + chiffres
        if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
            let num_str: String = chars[start..i].iter().collect();
            let v: f64 = num_str
                .parse()
                .map_err(|_| ErreurCalc::Syntaxe(format!("nombre invalide : '{num_str}'")))?;
            if !v.is_finite() {
                return Err(ErreurCalc::Syntaxe(format!("nombre trop grand : '{num_str}'")));
            }

            out.push(Tok::Num(v));
            continue;
        }

        return Err(ErreurCalc::Syntaxe(format!("caractère inattendu : '{c}'")));
    }

    Ok(out)
}

/// Format utilitaire (traces de pipeline) : liste de jetons en texte.
pub fn format_jetons(jetons: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in jetons {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::Pi => "π".to_string(),
            Tok::E => "e".to_string(),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Percent => "%".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::MoinsUnaire => "neg".to_string(),

            Tok::Fact => "!".to_string(),
            Tok::Carre => "²".to_string(),
            Tok::Cube => "³".to_string(),
            Tok::Barre => "|".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
