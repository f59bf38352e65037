// bible_qa_rust - A native Rust terminal interface for 성경QA
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

/// One entry of the static scripture catalog (개역한글 book names).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BibleBook {
    pub name: &'static str,
    pub category: &'static str,
}

const fn book(name: &'static str, category: &'static str) -> BibleBook {
    BibleBook { name, category }
}

/// All 66 books in canonical order. The mention picker filters this list;
/// it is fixed data, not derived from the backend.
pub const BIBLE_BOOKS: &[BibleBook] = &[
    // 구약
    book("창세기", "율법서"),
    book("출애굽기", "율법서"),
    book("레위기", "율법서"),
    book("민수기", "율법서"),
    book("신명기", "율법서"),
    book("여호수아", "역사서"),
    book("사사기", "역사서"),
    book("룻기", "역사서"),
    book("사무엘상", "역사서"),
    book("사무엘하", "역사서"),
    book("열왕기상", "역사서"),
    book("열왕기하", "역사서"),
    book("역대상", "역사서"),
    book("역대하", "역사서"),
    book("에스라", "역사서"),
    book("느헤미야", "역사서"),
    book("에스더", "역사서"),
    book("욥기", "시가서"),
    book("시편", "시가서"),
    book("잠언", "시가서"),
    book("전도서", "시가서"),
    book("아가", "시가서"),
    book("이사야", "대선지서"),
    book("예레미야", "대선지서"),
    book("예레미야애가", "대선지서"),
    book("에스겔", "대선지서"),
    book("다니엘", "대선지서"),
    book("호세아", "소선지서"),
    book("요엘", "소선지서"),
    book("아모스", "소선지서"),
    book("오바댜", "소선지서"),
    book("요나", "소선지서"),
    book("미가", "소선지서"),
    book("나훔", "소선지서"),
    book("하박국", "소선지서"),
    book("스바냐", "소선지서"),
    book("학개", "소선지서"),
    book("스가랴", "소선지서"),
    book("말라기", "소선지서"),
    // 신약
    book("마태복음", "복음서"),
    book("마가복음", "복음서"),
    book("누가복음", "복음서"),
    book("요한복음", "복음서"),
    book("사도행전", "역사서"),
    book("로마서", "바울서신"),
    book("고린도전서", "바울서신"),
    book("고린도후서", "바울서신"),
    book("갈라디아서", "바울서신"),
    book("에베소서", "바울서신"),
    book("빌립보서", "바울서신"),
    book("골로새서", "바울서신"),
    book("데살로니가전서", "바울서신"),
    book("데살로니가후서", "바울서신"),
    book("디모데전서", "바울서신"),
    book("디모데후서", "바울서신"),
    book("디도서", "바울서신"),
    book("빌레몬서", "바울서신"),
    book("히브리서", "공동서신"),
    book("야고보서", "공동서신"),
    book("베드로전서", "공동서신"),
    book("베드로후서", "공동서신"),
    book("요한일서", "공동서신"),
    book("요한이서", "공동서신"),
    book("요한삼서", "공동서신"),
    book("유다서", "공동서신"),
    book("요한계시록", "예언서"),
];
