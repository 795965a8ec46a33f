use std::io::{self, BufRead, Write};

use log::info;
use tictactoe_core::{Board, IllegalMoveError, Mark, Move, Outcome};
use tictactoe_engine::TicTacToeAi;

/// Runs an interactive game on stdin/stdout with the human playing X.
pub fn run() -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut ai = TicTacToeAi::new();
    play(stdin.lock(), stdout.lock(), Mark::X, &mut ai)?;
    Ok(())
}

/// Drives one game to completion, returning the final outcome.
///
/// The human plays `human`; the engine answers with the other mark. Input is
/// one move per line as `row col`, both 0-2; unparsable or illegal moves are
/// re-prompted. Returns `Outcome::InProgress` if the input runs out mid-game.
pub fn play<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    human: Mark,
    ai: &mut TicTacToeAi,
) -> io::Result<Outcome> {
    let mut board = Board::new();

    loop {
        writeln!(output, "{board}")?;
        writeln!(output)?;

        let outcome = board.outcome();
        if outcome != Outcome::InProgress {
            writeln!(output, "game over: {outcome}")?;
            return Ok(outcome);
        }

        if board.turn() == human {
            board = match human_move(&mut input, &mut output, &board)? {
                Some(next) => next,
                None => return Ok(outcome),
            };
        } else {
            let mv = ai
                .choose_move(&board)
                .expect("non-terminal board has a move");
            info!("engine plays {mv}");
            writeln!(output, "engine plays {mv}")?;
            board = board.apply(mv).expect("engine move targets an empty cell");
        }
    }
}

/// Prompts until the human enters an applicable move, or input ends.
fn human_move<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    board: &Board,
) -> io::Result<Option<Board>> {
    loop {
        write!(output, "your move (row col): ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let Some(mv) = parse_move(&line) else {
            writeln!(output, "expected two numbers 0-2, e.g. `0 2`")?;
            continue;
        };

        match board.apply(mv) {
            Ok(next) => return Ok(Some(next)),
            Err(IllegalMoveError(taken)) => {
                writeln!(output, "cell {taken} is already occupied")?;
            }
        }
    }
}

/// Parses a `row col` pair with both coordinates in 0-2.
fn parse_move(line: &str) -> Option<Move> {
    let mut parts = line.split_whitespace();
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Move::new(row, col)
}
