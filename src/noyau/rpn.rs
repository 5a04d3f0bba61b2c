// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Ident(name): DOIT résoudre dans la table fermée (fonction unaire),
//   sinon FonctionInconnue. Pas de variables dans cette grammaire.
// - Moins unaire: '-' en position préfixe devient MoinsUnaire (opérateur
//   préfixe, précédence entre +|- et ^), reconstruit en Sub(0, x).
//   Ainsi "2*-3" => 2*(0-3) et "10^-2" => 10^(0-2).
// - Plus unaire: '+' en position préfixe est neutre (ignoré).
// - Postfixes (!, ², ³) : sortie directe, collés à la valeur qui précède.
// - Barres |x| : une barre OUVRE quand aucune valeur ne précède, FERME sinon ;
//   l'appariement par pile supporte l'imbrication (|2-|3-4||).
//
// NOTE:
// - Les fonctions sont traitées comme des opérateurs "collés" à leur argument
//   et sont sorties après la parenthèse (ou barre) fermante.

use super::erreurs::{ErreurCalc, Resultat};
use super::expr::Expr;
use super::fonctions::Fonction;
use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash | Tok::Percent | Tok::MoinsUnaire => 2,
        Tok::Caret => 3,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret)
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   jetons: [Ident("sin"), LPar, Pi, Slash, Num(2), RPar]
///   rpn:    [Pi, Num(2), Slash, Ident("sin")]
pub fn to_rpn(jetons: &[Tok]) -> Resultat<Vec<Tok>> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // "valeur" = un atome ou une expression fermée.
    // Sert à détecter le moins unaire et le rôle (ouvrant/fermant) des barres.
    let mut prev_was_value = false;

    for tok in jetons.iter().cloned() {
        match tok {
            Tok::Num(_) | Tok::Pi | Tok::E => {
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                // Table fermée : tout identifiant est une fonction, sinon rejet.
                if Fonction::depuis_nom(&name).is_none() {
                    return Err(ErreurCalc::FonctionInconnue(name));
                }
                // fonction : on la garde sur la pile (elle sortira après son argument)
                ops.push(Tok::Ident(name));
                prev_was_value = false;
            }

            // Postfixes : s'appliquent à la valeur qui précède, sortie directe.
            Tok::Fact | Tok::Carre | Tok::Cube => {
                if !prev_was_value {
                    let sym = match tok {
                        Tok::Fact => "!",
                        Tok::Carre => "²",
                        _ => "³",
                    };
                    return Err(ErreurCalc::Syntaxe(format!("postfixe '{sym}' sans opérande")));
                }
                out.push(tok);
                // prev_was_value reste vrai : (5!)² est licite
            }

            Tok::LPar => {
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                // dépile jusqu'à '('
                let mut ouvrante_trouvee = false;
                while let Some(top) = ops.pop() {
                    match top {
                        Tok::LPar => {
                            ouvrante_trouvee = true;
                            break;
                        }
                        Tok::Barre => {
                            return Err(ErreurCalc::Syntaxe("'|' non apparié".into()));
                        }
                        _ => out.push(top),
                    }
                }
                if !ouvrante_trouvee {
                    return Err(ErreurCalc::Syntaxe(
                        "parenthèse fermante sans ouvrante".into(),
                    ));
                }

                // si une fonction est au sommet, on la sort aussi
                if matches!(ops.last(), Some(Tok::Ident(_))) {
                    out.push(ops.pop().unwrap());
                }

                prev_was_value = true;
            }

            Tok::Barre => {
                if prev_was_value {
                    // barre FERMANTE : dépile jusqu'à l'ouvrante, émet abs
                    let mut ouvrante_trouvee = false;
                    while let Some(top) = ops.pop() {
                        match top {
                            Tok::Barre => {
                                ouvrante_trouvee = true;
                                break;
                            }
                            Tok::LPar => {
                                return Err(ErreurCalc::Syntaxe("'|' non apparié".into()));
                            }
                            _ => out.push(top),
                        }
                    }
                    if !ouvrante_trouvee {
                        return Err(ErreurCalc::Syntaxe("'|' non apparié".into()));
                    }
                    out.push(Tok::Ident("abs".to_string()));

                    // comme pour RPar : une fonction collée sort aussi
                    if matches!(ops.last(), Some(Tok::Ident(_))) {
                        out.push(ops.pop().unwrap());
                    }

                    prev_was_value = true;
                } else {
                    // barre OUVRANTE
                    ops.push(Tok::Barre);
                }
            }

            Tok::Plus if !prev_was_value => {
                // plus unaire : neutre, on l'ignore
            }

            Tok::Plus | Tok::Star | Tok::Slash | Tok::Percent | Tok::Caret => {
                // dépile tant que:
                // - on n'est pas bloqué par '(' ou une barre ouvrante
                // - et on ne traverse pas une fonction (fonction reste collée à son argument)
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar | Tok::Barre | Tok::Ident(_)) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&tok);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if doit_pop {
                        out.push(ops.pop().unwrap());
                    } else {
                        break;
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Minus => {
                if !prev_was_value {
                    // moins unaire : opérateur préfixe, ne dépile rien
                    ops.push(Tok::MoinsUnaire);
                    continue;
                }

                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar | Tok::Barre | Tok::Ident(_)) {
                        break;
                    }
                    if precedence(top) >= precedence(&Tok::Minus) {
                        out.push(ops.pop().unwrap());
                    } else {
                        break;
                    }
                }

                ops.push(Tok::Minus);
                prev_was_value = false;
            }

            Tok::MoinsUnaire => {
                // jamais produit par le lexeur
                return Err(ErreurCalc::Interne("jeton préfixe inattendu".into()));
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        match op {
            Tok::LPar => return Err(ErreurCalc::Syntaxe("parenthèses non fermées".into())),
            Tok::Barre => return Err(ErreurCalc::Syntaxe("'|' non apparié".into())),
            _ => out.push(op),
        }
    }

    Ok(out)
}

/// Construit une Expr à partir d'une RPN.
///
/// Défense en profondeur : la table fermée est re-vérifiée ici, et les
/// jetons de groupement ne doivent jamais atteindre la RPN (bug du noyau).
pub fn from_rpn(rpn: &[Tok]) -> Resultat<Expr> {
    let mut st: Vec<Expr> = Vec::new();

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(v) => st.push(Expr::Num(v)),
            Tok::Pi => st.push(Expr::Pi),
            Tok::E => st.push(Expr::E),

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Percent | Tok::Caret => {
                let b = st
                    .pop()
                    .ok_or_else(|| ErreurCalc::Syntaxe("expression invalide".into()))?;
                let a = st
                    .pop()
                    .ok_or_else(|| ErreurCalc::Syntaxe("expression invalide".into()))?;

                let e = match tok {
                    Tok::Plus => Expr::Add(Box::new(a), Box::new(b)),
                    Tok::Minus => Expr::Sub(Box::new(a), Box::new(b)),
                    Tok::Star => Expr::Mul(Box::new(a), Box::new(b)),
                    Tok::Slash => Expr::Div(Box::new(a), Box::new(b)),
                    Tok::Percent => Expr::Mod(Box::new(a), Box::new(b)),
                    Tok::Caret => Expr::Pow(Box::new(a), Box::new(b)),
                    _ => unreachable!(),
                };

                st.push(e);
            }

            Tok::MoinsUnaire => {
                let x = st
                    .pop()
                    .ok_or_else(|| ErreurCalc::Syntaxe("expression invalide".into()))?;
                st.push(Expr::Sub(Box::new(Expr::Num(0.0)), Box::new(x)));
            }

            Tok::Fact | Tok::Carre | Tok::Cube => {
                let x = st
                    .pop()
                    .ok_or_else(|| ErreurCalc::Syntaxe("postfixe sans opérande".into()))?;
                let f = match tok {
                    Tok::Fact => Fonction::Factorielle,
                    Tok::Carre => Fonction::Carre,
                    _ => Fonction::Cube,
                };
                st.push(Expr::Appel(f, Box::new(x)));
            }

            Tok::Ident(name) => {
                let f = Fonction::depuis_nom(&name)
                    .ok_or_else(|| ErreurCalc::FonctionInconnue(name.clone()))?;
                let x = st
                    .pop()
                    .ok_or_else(|| ErreurCalc::Syntaxe("fonction sans argument".into()))?;
                st.push(Expr::Appel(f, Box::new(x)));
            }

            Tok::LPar | Tok::RPar | Tok::Barre => {
                return Err(ErreurCalc::Interne("jeton de groupement en RPN".into()));
            }
        }
    }

    if st.len() != 1 {
        return Err(ErreurCalc::Syntaxe("expression invalide".into()));
    }
    Ok(st.pop().unwrap())
}
