//! Tests for the CPU opponent.

use tictactoe_core::{Board, CpuAgent, CpuLevel, Mark};

const X: Option<Mark> = Some(Mark::X);
const O: Option<Mark> = Some(Mark::O);
const E: Option<Mark> = None;

#[test]
fn test_select_move_always_empty_cell() {
    let boards = [
        Board::new(),
        Board::from([X, O, X, E, O, E, E, X, E]),
        Board::from([X, O, X, O, X, O, O, X, E]),
        Board::from([E, X, X, O, O, X, X, O, O]),
    ];
    let mut cpu = CpuAgent::seeded(CpuLevel::Normal, 7);

    for board in &boards {
        for _ in 0..50 {
            let index = cpu.select_move(board).expect("board has an empty cell");
            assert!(board.is_empty(index), "CPU chose occupied cell {index}");
        }
    }
}

#[test]
fn test_single_empty_cell_is_forced() {
    let board = Board::from([X, O, X, O, X, O, O, X, E]);
    let mut cpu = CpuAgent::seeded(CpuLevel::Hard, 1);
    assert_eq!(cpu.select_move(&board), Some(8));
}

#[test]
fn test_full_board_yields_none() {
    let board = Board::from([X, O, X, X, O, O, O, X, X]);
    let mut cpu = CpuAgent::seeded(CpuLevel::Easy, 3);
    assert_eq!(cpu.select_move(&board), None);
}

#[test]
fn test_random_choice_covers_every_empty_cell() {
    let board = Board::new();
    let mut cpu = CpuAgent::seeded(CpuLevel::Normal, 42);
    let mut seen = [false; 9];
    for _ in 0..500 {
        if let Some(index) = cpu.select_move(&board) {
            seen[index] = true;
        }
    }
    assert!(seen.iter().all(|hit| *hit), "cells never chosen: {seen:?}");
}

#[test]
fn test_same_seed_same_moves() {
    let board = Board::new();
    let mut first = CpuAgent::seeded(CpuLevel::Normal, 99);
    let mut second = CpuAgent::seeded(CpuLevel::Normal, 99);
    for _ in 0..20 {
        assert_eq!(first.select_move(&board), second.select_move(&board));
    }
}

#[test]
fn test_level_change_keeps_choosing_empty_cells() {
    let board = Board::from([X, O, E, E, E, E, E, E, E]);
    let mut cpu = CpuAgent::seeded(CpuLevel::Easy, 11);
    assert_eq!(cpu.level(), CpuLevel::Easy);

    cpu.set_level(CpuLevel::Hard);
    assert_eq!(cpu.level(), CpuLevel::Hard);
    let index = cpu.select_move(&board).expect("board has an empty cell");
    assert!(board.is_empty(index));
}
