//! Tests for the tic-tac-toe board model.

use std::collections::HashSet;

use dooz_tictactoe::rules::LINES;
use dooz_tictactoe::{
    Board, BoardParseError, Move, MoveError, Outcome, Player, Position, Square, replay,
};

#[test]
fn test_new_board_is_empty() {
    let board = Board::new();
    assert!(board.squares().iter().all(|s| *s == Square::Empty));
    assert_eq!(board.to_move(), Player::X);
    assert_eq!(board.outcome(), Outcome::InProgress);
    assert_eq!(board.legal_moves(), Position::ALL.to_vec());
}

#[test]
fn test_apply_alternates_players() {
    let mut board = Board::new();
    assert_eq!(board.apply(Position::Center, Player::X), Ok(Outcome::InProgress));
    assert_eq!(board.to_move(), Player::O);
    assert_eq!(board.get(Position::Center), Square::Occupied(Player::X));

    assert_eq!(board.apply(Position::TopLeft, Player::O), Ok(Outcome::InProgress));
    assert_eq!(board.to_move(), Player::X);
}

#[test]
fn test_apply_occupied_square_fails() {
    let mut board = Board::new();
    board.apply(Position::Center, Player::X).unwrap();

    let err = board.apply(Position::Center, Player::O).unwrap_err();
    assert_eq!(err, MoveError::SquareOccupied(Position::Center));
    assert!(err.to_string().contains("occupied"));
    assert_eq!(board.count(Player::O), 0);
}

#[test]
fn test_apply_out_of_turn_fails() {
    let mut board = Board::new();
    assert_eq!(
        board.apply(Position::Center, Player::O),
        Err(MoveError::WrongPlayer(Player::O))
    );
    assert!(board.is_empty(Position::Center));
}

#[test]
fn test_apply_after_win_fails() {
    let mut board = Board::new();
    let moves = [
        (Position::TopLeft, Player::X),
        (Position::MiddleLeft, Player::O),
        (Position::TopCenter, Player::X),
        (Position::Center, Player::O),
    ];
    for (pos, player) in moves {
        board.apply(pos, player).unwrap();
    }
    assert_eq!(board.apply(Position::TopRight, Player::X), Ok(Outcome::XWins));

    // Empty squares remain, but the game is over.
    assert!(!board.legal_moves().is_empty());
    assert_eq!(
        board.apply(Position::MiddleRight, Player::O),
        Err(MoveError::GameOver(Outcome::XWins))
    );
}

#[test]
fn test_full_board_has_no_legal_moves() {
    let mut board: Board = "XOXXOOOXX".parse().unwrap();
    assert_eq!(board.outcome(), Outcome::Draw);
    assert!(board.legal_moves().is_empty());

    for pos in Position::ALL {
        for player in [Player::X, Player::O] {
            assert_eq!(
                board.apply(pos, player),
                Err(MoveError::GameOver(Outcome::Draw))
            );
        }
    }
}

#[test]
fn test_legal_moves_ascending() {
    let board: Board = "_X_O_X_O_".parse().unwrap();
    let indices: Vec<usize> = board.legal_moves().iter().map(|p| p.to_index()).collect();
    assert_eq!(indices, vec![0, 2, 4, 6, 8]);
}

#[test]
fn test_winning_line() {
    let board: Board = "OX_OX__X_".parse().unwrap();
    assert_eq!(board.outcome(), Outcome::XWins);
    assert_eq!(
        board.winning_line(),
        Some([Position::TopCenter, Position::Center, Position::BottomCenter])
    );
}

#[test]
fn test_reset_clears_board() {
    let mut board: Board = "XOX_O____".parse().unwrap();
    board.reset();
    assert_eq!(board, Board::new());
    assert_eq!(board.to_move(), Player::X);
}

#[test]
fn test_reset_and_replay_reproduces_outcome() {
    let game = [
        Move::new(Player::X, Position::Center),
        Move::new(Player::O, Position::TopLeft),
        Move::new(Player::X, Position::TopRight),
        Move::new(Player::O, Position::BottomLeft),
        Move::new(Player::X, Position::MiddleLeft),
        Move::new(Player::O, Position::MiddleRight),
        Move::new(Player::X, Position::TopCenter),
        Move::new(Player::O, Position::BottomCenter),
        Move::new(Player::X, Position::BottomRight),
    ];

    let mut board = Board::new();
    let outcome = replay(&mut board, &game).unwrap();
    assert_eq!(outcome, Outcome::Draw);
    let finished = board.clone();

    // Record, reset, replay.
    let recorded = serde_json::to_string(&game).unwrap();
    board.reset();
    let moves: Vec<Move> = serde_json::from_str(&recorded).unwrap();
    assert_eq!(replay(&mut board, &moves), Ok(outcome));
    assert_eq!(board, finished);
}

#[test]
fn test_replay_stops_at_invalid_move() {
    let mut board = Board::new();
    let moves = [
        Move::new(Player::X, Position::Center),
        Move::new(Player::O, Position::Center),
        Move::new(Player::O, Position::TopLeft),
    ];
    assert_eq!(
        replay(&mut board, &moves),
        Err(MoveError::SquareOccupied(Position::Center))
    );
    assert!(board.is_empty(Position::TopLeft));
}

fn collect_reachable(board: &Board, seen: &mut HashSet<Board>) {
    if !seen.insert(board.clone()) || board.outcome().is_terminal() {
        return;
    }
    for pos in board.legal_moves() {
        let mut next = board.clone();
        next.apply(pos, board.to_move()).unwrap();
        collect_reachable(&next, seen);
    }
}

#[test]
fn test_reachable_boards_have_at_most_one_winner() {
    let mut seen = HashSet::new();
    collect_reachable(&Board::new(), &mut seen);
    assert_eq!(seen.len(), 5478);

    for board in &seen {
        let winners: HashSet<Player> = LINES
            .iter()
            .filter_map(|&[a, b, c]| {
                let sq = board.get(a);
                (sq == board.get(b) && sq == board.get(c))
                    .then(|| sq.player())
                    .flatten()
            })
            .collect();
        assert!(winners.len() <= 1, "two winners on {}", board);

        let x = board.count(Player::X);
        let o = board.count(Player::O);
        assert!(x == o || x == o + 1, "count invariant broken on {}", board);

        match board.outcome() {
            Outcome::XWins => assert!(winners.contains(&Player::X)),
            Outcome::OWins => assert!(winners.contains(&Player::O)),
            Outcome::Draw => assert!(winners.is_empty() && board.legal_moves().is_empty()),
            Outcome::InProgress => assert!(winners.is_empty()),
        }
    }
}

#[test]
fn test_parse_and_display() {
    let board: Board = "XO_/_X_/__O".parse().unwrap();
    assert_eq!(board.to_string(), "XO__X___O");
    assert_eq!(board.display(), " X | O | 3 \n---+---+---\n 4 | X | 6 \n---+---+---\n 7 | 8 | O ");
}

#[test]
fn test_parse_errors() {
    assert_eq!("XO".parse::<Board>(), Err(BoardParseError::Length(2)));
    assert_eq!("XO_____Z_".parse::<Board>(), Err(BoardParseError::Symbol('Z')));
    assert_eq!(
        "OO_______".parse::<Board>(),
        Err(BoardParseError::Counts { x: 0, o: 2 })
    );
    assert_eq!(
        "XXX______".parse::<Board>(),
        Err(BoardParseError::Counts { x: 3, o: 0 })
    );
    assert_eq!("o".parse::<Player>(), Ok(Player::O));
    assert!("Z".parse::<Player>().is_err());
}

#[test]
fn test_parse_rejects_unreachable_wins() {
    assert_eq!("XXXOOO___".parse::<Board>(), Err(BoardParseError::TwoWinners));
    // X completed the top row, then O moved again.
    assert_eq!(
        "XXXOO_O__".parse::<Board>(),
        Err(BoardParseError::MovedAfterWin(Player::X))
    );
    // O completed the middle row, then X moved again.
    assert_eq!(
        "X_XOOOX_X".parse::<Board>(),
        Err(BoardParseError::MovedAfterWin(Player::O))
    );

    let x_won: Board = "XXXOO____".parse().unwrap();
    assert_eq!(x_won.outcome(), Outcome::XWins);
    let o_won: Board = "XXO_O_OX_".parse().unwrap();
    assert_eq!(o_won.outcome(), Outcome::OWins);
}

#[test]
fn test_parse_accepts_every_reachable_board() {
    let mut seen = HashSet::new();
    let mut stack = vec![Board::new()];
    while let Some(board) = stack.pop() {
        if !seen.insert(board.clone()) {
            continue;
        }
        assert_eq!(board.to_string().parse::<Board>(), Ok(board.clone()));
        if board.outcome().is_terminal() {
            continue;
        }
        let player = board.to_move();
        for pos in board.legal_moves() {
            let mut next = board.clone();
            next.apply(pos, player).unwrap();
            stack.push(next);
        }
    }
    assert_eq!(seen.len(), 5478);
}
