/// Script parser: keyword lines, argument lines and numeric fields
use nom::{
    bytes::complete::take_till1,
    character::complete::{multispace0, multispace1},
    combinator::{all_consuming, opt, rest},
    number::complete::double,
    sequence::{preceded, tuple},
    IResult,
};
use wire3d_core::{Axis, CurveKind, CurvePoints, Point3};

use crate::command::{Command, Statement};
use crate::error::{Result, ScriptError};

/// Keywords whose arguments sit on the following line
const ARGUMENT_COMMANDS: &[&str] = &[
    "line", "circle", "hermite", "bezier", "box", "sphere", "torus", "move", "scale", "rotate",
    "save",
];

/// Keywords that take nothing after them
const BARE_COMMANDS: &[&str] = &["ident", "apply", "clear", "draw", "display", "show", "quit"];

/// Parse a whole script into statements. Parsing stops after `quit`.
pub fn parse_script(source: &str) -> Result<Vec<Statement>> {
    let mut statements = Vec::new();
    let mut lines = source.lines().enumerate().map(|(i, l)| (i + 1, l.trim()));

    while let Some((number, line)) = lines.next() {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (keyword, inline) = split_keyword(line);
        let parsed = if ARGUMENT_COMMANDS.contains(&keyword) {
            match lines.next() {
                Some((_, args)) => parse_arguments(keyword, args),
                None => Err(ScriptError::MissingArguments(keyword.to_string())),
            }
        } else {
            parse_immediate(keyword, inline)
        };
        let command = parsed.map_err(|e| e.at(number, keyword))?;

        let quit = command == Command::Quit;
        statements.push(Statement {
            line: number,
            command,
        });
        if quit {
            break;
        }
    }

    Ok(statements)
}

fn keyword_line(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    tuple((
        preceded(multispace0, take_till1(char::is_whitespace)),
        opt(preceded(multispace1, rest)),
    ))(input)
}

/// Split `color yellow` into `("color", "yellow")`
fn split_keyword(line: &str) -> (&str, &str) {
    match keyword_line(line) {
        Ok((_, (keyword, inline))) => (keyword, inline.unwrap_or("").trim()),
        Err(_) => (line, ""),
    }
}

fn parse_immediate(keyword: &str, inline: &str) -> Result<Command> {
    if BARE_COMMANDS.contains(&keyword) && !inline.is_empty() {
        return Err(ScriptError::ArgumentCount {
            expected: 0,
            found: inline.split_whitespace().count(),
        });
    }

    let command = match keyword {
        "ident" => Command::Ident,
        "apply" => Command::Apply,
        "clear" => Command::Clear,
        "draw" => Command::Draw,
        "display" => Command::Display,
        "show" => Command::Show,
        "quit" => Command::Quit,
        "color" => {
            let mut words = inline.split_whitespace();
            match (words.next(), words.count()) {
                (Some(name), 0) => Command::Color(name.to_string()),
                (None, _) => return Err(ScriptError::ArgumentCount { expected: 1, found: 0 }),
                (Some(_), extra) => {
                    return Err(ScriptError::ArgumentCount {
                        expected: 1,
                        found: extra + 1,
                    })
                }
            }
        }
        other => return Err(ScriptError::UnknownCommand(other.to_string())),
    };
    Ok(command)
}

fn parse_arguments(keyword: &str, args: &str) -> Result<Command> {
    let command = match keyword {
        "line" => {
            let [x0, y0, z0, x1, y1, z1] = fixed(args)?;
            Command::Line {
                p0: Point3::new(x0, y0, z0),
                p1: Point3::new(x1, y1, z1),
            }
        }
        "circle" => {
            let [cx, cy, cz, radius] = fixed(args)?;
            Command::Circle {
                center: Point3::new(cx, cy, cz),
                radius,
            }
        }
        "hermite" | "bezier" => Command::Curve {
            kind: keyword.parse::<CurveKind>()?,
            points: CurvePoints::from_flat(fixed(args)?),
        },
        "box" => {
            let [x, y, z, width, height, depth] = fixed(args)?;
            Command::Box {
                corner: Point3::new(x, y, z),
                width,
                height,
                depth,
            }
        }
        "sphere" => {
            let [cx, cy, cz, radius] = fixed(args)?;
            Command::Sphere {
                center: Point3::new(cx, cy, cz),
                radius,
            }
        }
        "torus" => {
            let [cx, cy, cz, tube_radius, ring_radius] = fixed(args)?;
            Command::Torus {
                center: Point3::new(cx, cy, cz),
                tube_radius,
                ring_radius,
            }
        }
        "move" => Command::Move(fixed(args)?),
        "scale" => Command::Scale(fixed(args)?),
        "rotate" => {
            let (axis, degrees) = parse_rotation(args)?;
            Command::Rotate { axis, degrees }
        }
        "save" => {
            let path = args.trim();
            if path.is_empty() {
                return Err(ScriptError::ArgumentCount { expected: 1, found: 0 });
            }
            Command::Save(path.into())
        }
        other => return Err(ScriptError::UnknownCommand(other.to_string())),
    };
    Ok(command)
}

/// Parse one numeric token; the whole token must be a number
pub fn parse_number(token: &str) -> Result<f64> {
    all_consuming(double::<&str, nom::error::Error<&str>>)(token)
        .map(|(_, value)| value)
        .map_err(|_| ScriptError::MalformedNumericInput {
            token: token.to_string(),
        })
}

/// Parse every whitespace-separated token on a line as a double
pub fn parse_floats(line: &str) -> Result<Vec<f64>> {
    line.split_whitespace().map(parse_number).collect()
}

/// Parse exactly `N` numbers
pub fn fixed<const N: usize>(line: &str) -> Result<[f64; N]> {
    let values = parse_floats(line)?;
    values
        .try_into()
        .map_err(|v: Vec<f64>| ScriptError::ArgumentCount {
            expected: N,
            found: v.len(),
        })
}

/// Parse `axis degrees`, e.g. `y 45`
pub fn parse_rotation(line: &str) -> Result<(Axis, f64)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [axis, degrees] => Ok((axis.parse::<Axis>()?, parse_number(degrees)?)),
        other => Err(ScriptError::ArgumentCount {
            expected: 2,
            found: other.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wire3d_core::GeometryError;

    #[test_log::test]
    fn test_parse_floats() {
        assert_eq!(parse_floats(" 1 -2.5\t3e2 ").unwrap(), vec![1.0, -2.5, 300.0]);
        assert!(parse_floats("").unwrap().is_empty());
        match parse_floats("1 2x 3") {
            Err(ScriptError::MalformedNumericInput { token }) => assert_eq!(token, "2x"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test_log::test]
    fn test_fixed_arity() {
        let [a, b, c] = fixed::<3>("4 5 6").unwrap();
        assert_eq!((a, b, c), (4.0, 5.0, 6.0));
        assert!(matches!(
            fixed::<3>("4 5"),
            Err(ScriptError::ArgumentCount { expected: 3, found: 2 })
        ));
        assert!(matches!(
            fixed::<3>("4 5 6 7"),
            Err(ScriptError::ArgumentCount { expected: 3, found: 4 })
        ));
    }

    #[test_log::test]
    fn test_parse_rotation() {
        assert_eq!(parse_rotation("z 90").unwrap(), (Axis::Z, 90.0));
        assert!(matches!(
            parse_rotation("q 90"),
            Err(ScriptError::Geometry(GeometryError::UnknownAxis(_)))
        ));
        assert!(matches!(
            parse_rotation("x"),
            Err(ScriptError::ArgumentCount { expected: 2, found: 1 })
        ));
    }

    #[test_log::test]
    fn test_parse_script() {
        let source = "\
# a comment
line
0 0 0 10 10 10

color yellow
rotate
x 45
bezier
0 0 1 1 2 2 3 3
apply
save
out.png
quit
this is never read
";
        let statements = parse_script(source).unwrap();
        let commands: Vec<&str> = statements.iter().map(|s| s.command.name()).collect();
        assert_eq!(
            commands,
            ["line", "color", "rotate", "bezier", "apply", "save", "quit"]
        );
        assert_eq!(statements[0].line, 2);
        assert_eq!(statements[1].command, Command::Color("yellow".into()));
        assert_eq!(
            statements[2].command,
            Command::Rotate {
                axis: Axis::X,
                degrees: 45.0
            }
        );
        assert_eq!(statements[5].command, Command::Save("out.png".into()));
        assert_eq!(statements[6].line, 13);
    }

    #[test_log::test]
    fn test_errors_carry_line_and_command() {
        let err = parse_script("ident\nbox\n1 2 three 4 5 6\n").unwrap_err();
        match &err {
            ScriptError::Command { line, command, .. } => {
                assert_eq!(*line, 2);
                assert_eq!(command, "box");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            err.root(),
            ScriptError::MalformedNumericInput { token } if token == "three"
        ));
    }

    #[test_log::test]
    fn test_unknown_and_truncated_commands() {
        let err = parse_script("frobnicate now\n").unwrap_err();
        assert!(matches!(err.root(), ScriptError::UnknownCommand(word) if word == "frobnicate"));

        let err = parse_script("ident\nsphere").unwrap_err();
        assert!(matches!(err.root(), ScriptError::MissingArguments(word) if word == "sphere"));

        let err = parse_script("ident\napply 3\n").unwrap_err();
        assert!(matches!(&err, ScriptError::Command { line: 2, .. }));
        assert!(matches!(
            err.root(),
            ScriptError::ArgumentCount { expected: 0, found: 1 }
        ));
        for line in ["ident foo", "quit now please", "draw x"] {
            assert!(parse_script(line).is_err(), "accepted {line:?}");
        }

        let err = parse_script("color").unwrap_err();
        assert!(matches!(
            err.root(),
            ScriptError::ArgumentCount { expected: 1, found: 0 }
        ));
    }
}
